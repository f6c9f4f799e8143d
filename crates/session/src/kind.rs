use std::{borrow::Cow, collections::HashSet, sync::Arc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindBundle {
    pub name: Cow<'static, str>,
    pub behavior: Cow<'static, str>,
    pub style: Cow<'static, str>,
}

impl KindBundle {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        behavior: impl Into<Cow<'static, str>>,
        style: impl Into<Cow<'static, str>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            behavior: behavior.into(),
            style: style.into(),
        })
    }
}

#[derive(Debug, Default)]
pub struct KindAssets {
    seen: HashSet<String>,
    behavior: String,
    style: String,
}

impl KindAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit_once(&mut self, bundle: &KindBundle) -> bool {
        if !self.seen.insert(bundle.name.to_string()) {
            return false;
        }
        push_block(&mut self.behavior, &bundle.behavior);
        push_block(&mut self.style, &bundle.style);
        true
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.seen.contains(kind)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn behavior(&self) -> &str {
        &self.behavior
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub(crate) fn into_parts(self) -> (String, String) {
        (self.behavior, self.style)
    }
}

pub(crate) fn push_block(out: &mut String, block: &str) {
    let block = block.trim();
    if block.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(block);
}

#[cfg(test)]
#[path = "tests/kind_tests.rs"]
mod tests;
