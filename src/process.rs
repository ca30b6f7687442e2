//! Process abstraction
//! `ChainedProcess` is monomorphised: the compiler knows the concrete type of
//! every stage and inlines the whole chain. `DynamicProcess` holds stages
//! behind `Arc<dyn Stage>` for chains assembled at run time.
use crate::{
    context::Context,
    stage::{Stage, StageError, map_chars},
};
use smallvec::SmallVec;
use std::{borrow::Cow, sync::Arc};

pub trait Process {
    fn process<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError>;
}

pub struct EmptyProcess;

impl Process for EmptyProcess {
    #[inline(always)]
    fn process<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        Ok(text)
    }
}

pub struct ChainedProcess<S: Stage, P: Process> {
    pub stage: S,
    pub previous: P,
}

impl<S: Stage> ChainedProcess<S, EmptyProcess> {
    #[inline(always)]
    pub fn first(stage: S) -> Self {
        Self {
            stage,
            previous: EmptyProcess,
        }
    }
}

impl<S: Stage, P: Process> ChainedProcess<S, P> {
    /// Append `stage` after everything in `self`.
    #[inline(always)]
    pub fn then<T: Stage>(self, stage: T) -> ChainedProcess<T, Self> {
        ChainedProcess {
            stage,
            previous: self,
        }
    }
}

impl<S: Stage, P: Process> Process for ChainedProcess<S, P> {
    #[inline(always)]
    fn process<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Result<Cow<'a, str>, StageError> {
        let current: Cow<'_, str> = self.previous.process(text, ctx)?;
        if !self.stage.needs_apply(&current, ctx)? {
            return Ok(current);
        }
        self.stage.apply(current, ctx)
    }
}

#[derive(Default)]
pub struct DynamicProcess {
    pub(crate) stages: SmallVec<[Arc<dyn Stage>; 8]>,
}

impl DynamicProcess {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn push<T: Stage + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }
}

impl Process for DynamicProcess {
    fn process<'a>(
        &self,
        mut text: Cow<'a, str>,
        ctx: &Context,
    ) -> Result<Cow<'a, str>, StageError> {
        for stage in &self.stages {
            if !stage.needs_apply(&text, ctx)? {
                continue;
            }
            text = match stage.as_char_mapper(ctx) {
                Some(mapper) => map_chars(mapper, text, ctx),
                None => stage.apply(text, ctx)?,
            };
            log::trace!("{} -> {:?}", stage.name(), text);
        }
        Ok(text)
    }
}
