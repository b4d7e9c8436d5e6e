//! Lookup, merge and deletion over the tree.

use super::model::{Config, Section, UciOption};
use super::selector::{Selector, SelectorError, parse_selector, placeholder_name, resolve_index};
use super::types::OptionType;
use crate::error::{Result, UciError};
use std::collections::{HashMap, HashSet};

impl Config {
    /// Fetch a section by name or by `@type[index]` selector.
    ///
    /// Malformed or out-of-range selectors yield `None`; use
    /// [`Config::try_get`] to see why.
    pub fn get(&self, selector: &str) -> Option<&Section> {
        match self.try_get(selector) {
            Ok(section) => section,
            Err(e) => {
                tracing::debug!(config = %self.name, selector, error = %e, "section lookup failed");
                None
            }
        }
    }

    /// Fetch a section by name or selector, reporting selector errors.
    ///
    /// `Ok(None)` means the selector is valid but nothing matches.
    pub fn try_get(&self, selector: &str) -> std::result::Result<Option<&Section>, SelectorError> {
        Ok(self.position(selector)?.map(|i| &self.sections[i]))
    }

    /// Mutable variant of [`Config::get`]. Marks the config as tainted when a
    /// section is returned.
    pub fn get_mut(&mut self, selector: &str) -> Option<&mut Section> {
        let position = match self.position(selector) {
            Ok(position) => position?,
            Err(e) => {
                tracing::debug!(config = %self.name, selector, error = %e, "section lookup failed");
                return None;
            }
        };
        self.tainted = true;
        self.sections.get_mut(position)
    }

    /// Mutable variant of [`Config::try_get`]. Marks the config as tainted
    /// when a section is returned.
    pub fn try_get_mut(
        &mut self,
        selector: &str,
    ) -> std::result::Result<Option<&mut Section>, SelectorError> {
        let Some(position) = self.position(selector)? else {
            return Ok(None);
        };
        self.tainted = true;
        Ok(self.sections.get_mut(position))
    }

    /// Fetch a section by its stored name.
    pub fn get_named(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|sec| sec.has_name(name))
    }

    /// Fetch a section by `@type[index]` selector.
    pub fn get_unnamed(
        &self,
        selector: &str,
    ) -> std::result::Result<Option<&Section>, SelectorError> {
        let (section_type, index) = parse_selector(selector)?;
        Ok(self
            .position_unnamed(section_type, index)?
            .map(|i| &self.sections[i]))
    }

    fn position(&self, selector: &str) -> std::result::Result<Option<usize>, SelectorError> {
        match Selector::parse(selector)? {
            Selector::Named(name) => Ok(self.sections.iter().position(|sec| sec.has_name(name))),
            Selector::Positional {
                section_type,
                index,
            } => self.position_unnamed(section_type, index),
        }
    }

    fn position_unnamed(
        &self,
        section_type: &str,
        index: i64,
    ) -> std::result::Result<Option<usize>, SelectorError> {
        let target = resolve_index(index, self.count(section_type))?;
        Ok(self
            .sections
            .iter()
            .enumerate()
            .filter(|(_, sec)| sec.section_type == section_type)
            .nth(target)
            .map(|(i, _)| i))
    }

    /// Number of sections of the given type.
    pub fn count(&self, section_type: &str) -> usize {
        self.sections
            .iter()
            .filter(|sec| sec.section_type == section_type)
            .count()
    }

    /// Positional index of `section` among the sections of its type.
    ///
    /// Fails with [`UciError::ForeignSection`] when `section` is not an
    /// element of this config.
    pub fn index(&self, section: &Section) -> Result<usize> {
        let mut n = 0;
        for sec in &self.sections {
            if std::ptr::eq(sec, section) {
                return Ok(n);
            }
            if sec.section_type == section.section_type {
                n += 1;
            }
        }
        Err(UciError::ForeignSection {
            config: self.name.clone(),
        })
    }

    /// Stored name of `section`, or its synthetic `@type[index]` name.
    pub fn section_name(&self, section: &Section) -> Result<String> {
        if !section.name.is_empty() {
            return Ok(section.name.clone());
        }
        Ok(placeholder_name(&section.section_type, self.index(section)?))
    }

    /// Append a section.
    pub fn add(&mut self, section: Section) -> &mut Section {
        self.tainted = true;
        let at = self.sections.len();
        self.sections.push(section);
        &mut self.sections[at]
    }

    /// Merge a section built in isolation, i.e. an unnamed section is taken
    /// to be the first of its type.
    pub fn merge(&mut self, section: Section) -> &mut Section {
        self.merge_at(section, 0)
    }

    /// Merge a section whose intended positional index is `position`.
    ///
    /// Identity is the stored name, or `@type[position]` for an unnamed
    /// section. If an existing section has the same identity its options are
    /// merged into it and it is returned; otherwise `section` is appended.
    pub fn merge_at(&mut self, section: Section, position: usize) -> &mut Section {
        let at = self.merge_index(section, position);
        &mut self.sections[at]
    }

    /// Like [`Config::merge_at`], returning the index of the resulting section.
    pub(crate) fn merge_index(&mut self, section: Section, position: usize) -> usize {
        let key = if section.name.is_empty() {
            placeholder_name(&section.section_type, position)
        } else {
            section.name.clone()
        };

        match self.position_of_identity(&key) {
            Some(i) => {
                self.tainted = true;
                let existing = &mut self.sections[i];
                for option in section.options {
                    existing.merge(option);
                }
                i
            }
            None => {
                self.add(section);
                self.sections.len() - 1
            }
        }
    }

    /// Overlay another config on top of this one, section by section. Unnamed
    /// sections of `other` keep the positions they have inside `other`.
    pub fn merge_config(&mut self, other: Config) {
        let mut seen = HashMap::<String, usize>::new();
        for section in other.sections {
            let n = seen.entry(section.section_type.clone()).or_insert(0);
            let position = *n;
            *n += 1;
            self.merge_at(section, position);
        }
    }

    /// First section whose name, or synthetic name when unnamed, equals `key`.
    fn position_of_identity(&self, key: &str) -> Option<usize> {
        let mut seen = HashMap::<&str, usize>::new();
        self.sections.iter().position(|sec| {
            let n = seen.entry(sec.section_type.as_str()).or_insert(0);
            let index = *n;
            *n += 1;
            if sec.name.is_empty() {
                placeholder_name(&sec.section_type, index) == key
            } else {
                sec.name == key
            }
        })
    }

    /// Remove the first section matching `name`, either literally or as an
    /// `@type[index]` selector. Returns whether a section was removed.
    pub fn del(&mut self, name: &str) -> bool {
        let positional = parse_selector(name).ok().and_then(|(section_type, index)| {
            resolve_index(index, self.count(section_type))
                .ok()
                .map(|target| (section_type, target))
        });

        let mut seen = 0;
        let found = self.sections.iter().position(|sec| {
            if sec.has_name(name) {
                return true;
            }
            match positional {
                Some((section_type, target)) if sec.section_type == section_type => {
                    let hit = seen == target;
                    seen += 1;
                    hit
                }
                _ => false,
            }
        });

        match found {
            Some(i) => {
                self.sections.remove(i);
                self.tainted = true;
                true
            }
            None => false,
        }
    }
}

impl Section {
    /// Whether the stored name is `name`. An unnamed section has no name to
    /// match, not even the empty one.
    fn has_name(&self, name: &str) -> bool {
        !self.name.is_empty() && self.name == name
    }

    /// Append an option without checking for an existing one of that name.
    pub fn add(&mut self, option: UciOption) {
        self.options.push(option);
    }

    /// Merge values into the option of the same name, or append `option`.
    pub fn merge(&mut self, option: UciOption) {
        match self.get_mut(&option.name) {
            Some(existing) => existing.merge_values(option.values),
            None => self.options.push(option),
        }
    }

    /// Replace the type and values of an option, adding it if missing.
    pub fn set<I, V>(&mut self, name: &str, option_type: OptionType, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        match self.get_mut(name) {
            Some(existing) => {
                existing.option_type = option_type;
                existing.set_values(values);
            }
            None => self.options.push(UciOption::new(name, option_type, values)),
        }
    }

    /// Remove the option with the given name. Returns whether it existed.
    pub fn del(&mut self, name: &str) -> bool {
        match self.options.iter().position(|opt| opt.name == name) {
            Some(i) => {
                self.options.remove(i);
                true
            }
            None => false,
        }
    }

    /// Fetch an option by name.
    pub fn get(&self, name: &str) -> Option<&UciOption> {
        self.options.iter().find(|opt| opt.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut UciOption> {
        self.options.iter_mut().find(|opt| opt.name == name)
    }

    /// All values of an option.
    pub fn option_values(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(|opt| opt.values.as_slice())
    }

    /// Last value of an option.
    pub fn option_last_value(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|opt| opt.values.last())
            .map(String::as_str)
    }
}

impl UciOption {
    pub fn set_values<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
    }

    pub fn add_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Append the values not already present, keeping first-seen order.
    /// Existing values are never removed or reordered.
    pub fn merge_values<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut have: HashSet<String> = self.values.iter().cloned().collect();
        for value in values {
            let value = value.into();
            if have.insert(value.clone()) {
                self.values.push(value);
            }
        }
    }
}
