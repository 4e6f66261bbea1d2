//! Variable namespace.
//!
//! A stack of frames, root at the bottom. Lookup walks from the innermost
//! frame out; writes always land in the innermost frame. Scoping is
//! dynamic: a name resolves against whatever frames are live when the
//! lookup happens, not where the reading node was built.

use rustc_hash::FxHashMap;

use prex_ir::{Name, Number};

use crate::Value;

/// One level of bindings.
pub type Frame = FxHashMap<Name, Value>;

/// Stack of frames mapping names to values.
#[derive(Clone, Debug)]
pub struct Namespace {
    /// Frames, innermost last. Never empty: index 0 is the root.
    frames: Vec<Frame>,
}

impl Namespace {
    /// Create a namespace holding only an empty root frame.
    pub fn new() -> Self {
        Namespace {
            frames: vec![Frame::default()],
        }
    }

    /// Number of live frames, root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push an empty frame.
    #[inline]
    pub fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Pop the innermost frame. The root frame is never popped; trying
    /// returns `false`.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            true
        } else {
            tracing::warn!("attempted to pop the root frame");
            false
        }
    }

    /// Resolve `name`, innermost frame first.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Resolve `name`, falling back to `default`, or to `0` without one.
    pub fn get(&self, name: &str, default: Option<Value>) -> Value {
        match self.lookup(name) {
            Some(value) => value.clone(),
            None => default.unwrap_or(Value::Number(Number::ZERO)),
        }
    }

    /// Whether any live frame binds `name`.
    pub fn has(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame.contains_key(name))
    }

    /// Bind `name` in the innermost frame, shadowing outer bindings.
    pub fn set(&mut self, name: impl Into<Name>, value: Value) {
        self.innermost_mut().insert(name.into(), value);
    }

    /// Bind `name` in the root frame.
    pub fn set_root(&mut self, name: impl Into<Name>, value: Value) {
        self.frames[0].insert(name.into(), value);
    }

    /// Every visible binding, innermost winning, sorted by name.
    pub fn visible_bindings(&self) -> Vec<(Name, Value)> {
        let mut visible: FxHashMap<&Name, &Value> = FxHashMap::default();
        for frame in self.frames.iter().rev() {
            for (name, value) in frame {
                visible.entry(name).or_insert(value);
            }
        }
        let mut bindings: Vec<(Name, Value)> = visible
            .into_iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }

    fn innermost_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
