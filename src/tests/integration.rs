#[cfg(test)]
mod integration_tests {

    use crate::{
        GUJ, HIN, Lang, MAL, ORI, PAN, TEL, Tokenizer, TokenizerError, lang::ALL_LANGS,
    };
    use std::io::Write;

    #[test]
    fn every_language_tokenizes_mixed_text() {
        let input = "Price: ₹1,200 (approx). See you... bye!";
        for &lang in ALL_LANGS {
            let tok = Tokenizer::builder().lang(lang).build().unwrap();
            assert_eq!(
                tok.tokenize_line(input).unwrap(),
                "Price : ₹ 1,200 ( approx ) .\nSee you ... bye !",
                "{lang}"
            );
        }
    }

    #[test]
    fn scripts_split_from_latin_in_their_own_language() {
        let cases: [(Lang, &str, &str); 5] = [
            (GUJ, "abcગુજરાતી", "abc ગુજરાતી"),
            (PAN, "abcਪੰਜਾਬੀ", "abc ਪੰਜਾਬੀ"),
            (TEL, "abcతెలుగు", "abc తెలుగు"),
            (MAL, "abcമലയാളം", "abc മലയാളം"),
            (ORI, "abcଓଡ଼ିଆ", "abc ଓଡ଼ିଆ"),
        ];
        for (lang, input, expected) in cases {
            let tok = Tokenizer::builder().lang(lang).build().unwrap();
            assert_eq!(tok.tokenize_line(input).unwrap(), expected, "{lang}");
            // Other scripts are not boundaries for Hindi.
            let hin = Tokenizer::builder().lang(HIN).build().unwrap();
            assert_eq!(hin.tokenize_line(input).unwrap(), input, "{lang} under Hindi");
        }
    }

    #[test]
    fn prefix_and_dictionary_files() {
        let mut prefixes = tempfile::NamedTempFile::new().unwrap();
        writeln!(prefixes, "# test list\nProf\nfig #NUMERIC_ONLY#").unwrap();
        let mut dictionary = tempfile::NamedTempFile::new().unwrap();
        writeln!(dictionary, "2\nchapter/S\nend").unwrap();

        let tok = Tokenizer::builder()
            .prefix_file(prefixes.path())
            .dictionary_file(dictionary.path())
            .build()
            .unwrap();

        assert_eq!(tok.tokenize_line("Prof. Rao").unwrap(), "Prof. Rao");
        assert_eq!(tok.tokenize_line("see fig. 3").unwrap(), "see fig. 3");
        assert_eq!(tok.tokenize_line("see fig. Then").unwrap(), "see fig .\nThen");
        assert_eq!(tok.tokenize_line("Chapter. 3").unwrap(), "Chapter .\n3");
        assert_eq!(tok.tokenize_line("Dr. Rao").unwrap(), "Dr .\nRao");
    }

    #[test]
    fn missing_dictionary_fails_at_build() {
        let err = Tokenizer::builder()
            .dictionary_file("/no/such/words.dic")
            .build()
            .err();
        assert!(matches!(err, Some(TokenizerError::Lexicon(_))));
    }

    #[test]
    fn batch_keeps_order() {
        let tok = Tokenizer::default();
        let lines = ["a. B", "", "राम।", "x-y"];
        let out = tok.tokenize_lines(&lines).unwrap();
        assert_eq!(out, ["a .\nB", "", "राम ।", "x - y"]);
        for (line, batch) in lines.iter().zip(&out) {
            assert_eq!(&tok.tokenize_line(line).unwrap(), batch);
        }
    }

    #[test]
    fn shared_across_threads() {
        let tok = std::sync::Arc::new(Tokenizer::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let tok = tok.clone();
                std::thread::spawn(move || tok.tokenize_line(&format!("line {i}. next")).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("line {i} .\nnext"));
        }
    }

    #[test]
    fn output_round_trips_through_itself() {
        let tok = Tokenizer::default();
        let corpus = [
            "Hello world. How are you?",
            "Dr. Smith paid ₹1,200 (approx) on 12-05-2023!",
            "helloहै और 3,000 रुपये।",
            "wait... what?? really!!",
            "राम।। श्याम॥ फिर|",
            "see No. 5 and U.S. Army",
            "well-known ---- dash",
        ];
        for input in corpus {
            let once = tok.tokenize_line(input).unwrap();
            let rejoined = once.split_whitespace().collect::<Vec<_>>().join(" ");
            let twice = tok.tokenize_line(&rejoined).unwrap();
            assert_eq!(
                once.split_whitespace().collect::<Vec<_>>(),
                twice.split_whitespace().collect::<Vec<_>>(),
                "{input}"
            );
        }
    }
}
