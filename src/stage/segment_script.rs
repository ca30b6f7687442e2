use crate::{
    context::Context,
    lang::ScriptProfile,
    stage::{Stage, StageError},
    unicode::is_separator,
};
use std::borrow::Cow;

/// Split tokens where the active script starts or stops.
///
/// A space goes between two adjacent characters when exactly one of them is
/// a letter of the script (`helloहै` → `hello है`, `१०रुपये` → `१० रुपये`), and
/// around every special symbol of the profile (currency and fraction signs,
/// calendrical marks). Dandas are never script letters.
///
/// Without a script profile the stage does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SegmentScriptBoundaries;

impl SegmentScriptBoundaries {
    #[inline]
    fn is_boundary(profile: &ScriptProfile, a: char, b: char) -> bool {
        if is_separator(a) || is_separator(b) {
            return false;
        }
        profile.is_letter(a) != profile.is_letter(b) || profile.is_special(a) || profile.is_special(b)
    }

    fn pairs(text: &str) -> impl Iterator<Item = (char, char)> + '_ {
        text.chars().zip(text.chars().skip(1))
    }
}

impl Stage for SegmentScriptBoundaries {
    fn name(&self) -> &'static str {
        "segment_script_boundaries"
    }

    #[inline]
    fn needs_apply(&self, text: &str, ctx: &Context) -> Result<bool, StageError> {
        let Some(profile) = ctx.profile else {
            return Ok(false);
        };
        // Script letters and specials are all outside ASCII.
        if text.is_ascii() {
            return Ok(false);
        }
        Ok(Self::pairs(text).any(|(a, b)| Self::is_boundary(profile, a, b)))
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text, ctx)? {
            return Ok(text);
        }
        let Some(profile) = ctx.profile else {
            return Ok(text);
        };
        let mut out = String::with_capacity(text.len() + text.len() / 8);
        let mut prev: Option<char> = None;
        for c in text.chars() {
            if prev.is_some_and(|p| Self::is_boundary(profile, p, c)) {
                out.push(' ');
            }
            out.push(c);
            prev = Some(c);
        }
        log::trace!("script boundaries split for {}", profile.name);
        Ok(Cow::Owned(out))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::data::{BEN, GUJ, HIN, MAL, ORI, TAM, TEL};

    fn run(ctx: Context, input: &str) -> String {
        SegmentScriptBoundaries
            .apply(Cow::Borrowed(input), &ctx)
            .unwrap()
            .into_owned()
    }

    #[test]
    fn latin_and_devanagari_split() {
        assert_eq!(run(Context::new(HIN), "helloहै"), "hello है");
        assert_eq!(run(Context::new(HIN), "hello है"), "hello है");
    }

    #[test]
    fn native_digits_split_from_letters() {
        assert_eq!(run(Context::new(HIN), "कीमत१००"), "कीमत १००");
        assert_eq!(run(Context::new(HIN), "१२३"), "१२३");
    }

    #[test]
    fn dandas_stand_alone() {
        assert_eq!(run(Context::new(HIN), "राम।श्याम"), "राम । श्याम");
        assert_eq!(run(Context::new(HIN), "a।b"), "a । b");
        assert_eq!(run(Context::new(BEN), "রাম।"), "রাম ।");
    }

    #[test]
    fn profile_specials_are_isolated() {
        assert_eq!(run(Context::new(BEN), "৳৫০"), "৳ ৫০");
        assert_eq!(run(Context::new(GUJ), "ૐનમ"), "ૐ નમ");
        assert_eq!(run(Context::new(MAL), "൳൴"), "൳ ൴");
        assert_eq!(run(Context::new(TEL), "౸x"), "౸ x");
        assert_eq!(run(Context::new(TAM), "௳௴"), "௳ ௴");
        assert_eq!(run(Context::new(ORI), "୲୳"), "୲ ୳");
        assert_eq!(run(Context::new(ORI), "ଓ୷ଡ"), "ଓ ୷ ଡ");
    }

    #[test]
    fn foreign_scripts_are_not_letters() {
        // Bengali text under a Hindi profile is just "outside".
        assert_eq!(run(Context::new(HIN), "রামhello"), "রামhello");
        assert_eq!(run(Context::new(HIN), "রামराम"), "রাম राम");
    }

    #[test]
    fn unscripted_context_is_a_no_op() {
        let ctx = Context::unscripted(HIN);
        assert!(!SegmentScriptBoundaries.needs_apply("helloहै", &ctx).unwrap());
        assert_eq!(run(ctx, "helloहै"), "helloहै");
    }
}
