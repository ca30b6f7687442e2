use crate::{
    context::Context,
    lang::{ALL_LANGS, Lang},
    stage::Stage,
};
use std::borrow::Cow;

/// Trait that stages implement to opt into the universal test suite.
pub trait StageTestConfig: Stage + Sized {
    /// Languages the contract runs under. Default: all of them.
    fn languages() -> &'static [Lang] {
        ALL_LANGS
    }

    /// General samples (may or may not trigger changes).
    fn samples(_lang: Lang) -> &'static [&'static str] {
        &["Hello World 123", " नमस्ते दुनिया ", "TEST", ""]
    }

    /// Samples that must come back unchanged **and** borrowed.
    fn should_pass_through(_lang: Lang) -> &'static [&'static str] {
        &["hello", "world", "test123", "abc def", "नमस्ते दुनिया"]
    }

    /// Input/output pairs that pin down the transformation.
    fn should_transform(_lang: Lang) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Whether a second pass leaves the token sequence unchanged.
    fn idempotent() -> bool {
        true
    }
}

/// Assert that a stage satisfies the universal stage contracts.
///
/// 1. `zero_copy_when_no_changes` → pass-through samples stay borrowed
/// 2. `transforms_as_declared` → `should_transform` pairs hold
/// 3. `needs_apply_is_accurate` → the pre-check predicts whether `apply` changes text
/// 4. `stage_is_idempotent` → a second pass does not re-tokenize (when declared)
/// 5. `no_panic_on_mixed_scripts` → survives pathological real-world input
#[macro_export]
macro_rules! assert_stage_contract {
    ($stage:expr) => {
        let stage = $stage;
        $crate::testing::stage_contract::zero_copy_when_no_changes(&stage);
        $crate::testing::stage_contract::transforms_as_declared(&stage);
        $crate::testing::stage_contract::needs_apply_is_accurate(&stage);
        $crate::testing::stage_contract::stage_is_idempotent(&stage);
        $crate::testing::stage_contract::no_panic_on_mixed_scripts(&stage);
    };
}

pub fn zero_copy_when_no_changes<S: StageTestConfig>(stage: &S) {
    for &lang in S::languages() {
        let ctx = Context::new(lang);
        for &input in S::should_pass_through(lang) {
            assert!(
                !stage.needs_apply(input, &ctx).unwrap(),
                "needs_apply() claimed work on pass-through sample (stage: {}, lang: {lang:?}, input: `{input}`)",
                stage.name()
            );
            let out = stage.apply(Cow::Borrowed(input), &ctx).unwrap();
            assert_eq!(out.as_ref(), input);
            assert!(
                matches!(out, Cow::Borrowed(s) if std::ptr::eq(s, input)),
                "zero-copy violated on pass-through sample (stage: {}, lang: {lang:?}, input: `{input}`)",
                stage.name()
            );
        }
    }
}

pub fn transforms_as_declared<S: StageTestConfig>(stage: &S) {
    for &lang in S::languages() {
        let ctx = Context::new(lang);
        for &(input, expected) in S::should_transform(lang) {
            let out = stage.apply(Cow::Borrowed(input), &ctx).unwrap();
            assert_eq!(
                out.as_ref(),
                expected,
                "stage `{}` in {lang:?} on `{input}`",
                stage.name()
            );
        }
    }
}

pub fn needs_apply_is_accurate<S: StageTestConfig>(stage: &S) {
    for &lang in S::languages() {
        let ctx = Context::new(lang);
        let inputs = S::samples(lang)
            .iter()
            .chain(S::should_pass_through(lang))
            .copied()
            .chain(S::should_transform(lang).iter().map(|&(i, _)| i));
        for input in inputs {
            check_accuracy(stage, input, &ctx);
        }
    }
}

fn check_accuracy<S: Stage>(stage: &S, input: &str, ctx: &Context) {
    let predicted = stage.needs_apply(input, ctx).expect("needs_apply errored");
    // Owned input so stages that always allocate are judged on content only.
    let output = stage
        .apply(Cow::Owned(input.to_owned()), ctx)
        .expect("apply errored");
    let actually_changes = output != input;
    assert_eq!(
        predicted,
        actually_changes,
        "needs_apply() mismatch for stage `{}` in {lang:?} on `{input}`\n\
         predicted: {predicted}\n\
         actual   : {actually_changes} (output = {output:?})",
        stage.name(),
        lang = ctx.lang
    );
}

pub fn stage_is_idempotent<S: StageTestConfig>(stage: &S) {
    if !S::idempotent() {
        return;
    }
    for &lang in S::languages() {
        let ctx = Context::new(lang);
        for &input in S::samples(lang) {
            let once = stage.apply(Cow::Borrowed(input), &ctx).unwrap();
            let twice = stage.apply(Cow::Owned(once.to_string()), &ctx).unwrap();
            let once_tokens: Vec<&str> = once.split_whitespace().collect();
            let twice_tokens: Vec<&str> = twice.split_whitespace().collect();
            assert_eq!(
                once_tokens,
                twice_tokens,
                "stage `{}` not idempotent in {lang:?} on `{input}`",
                stage.name()
            );
        }
    }
}

pub fn no_panic_on_mixed_scripts<S: StageTestConfig>(stage: &S) {
    for &lang in S::languages() {
        let ctx = Context::new(lang);
        let _ = stage.apply(
            Cow::Borrowed("Hello 世界 हिन्दी বাংলা தமிழ் ... ।। ॥॥ 'x' 1,2 a-b | . ।"),
            &ctx,
        );
        let _ = stage.apply(Cow::Borrowed(""), &ctx);
    }
}
