//! Editing lifecycle callbacks.
//!
//! Floating-label widgets implement these traits themselves, act on each
//! event, then relay it to an optional caller-supplied delegate of the same
//! trait. Default method bodies are the answers used when no delegate is
//! installed, so a delegate only overrides what it cares about.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::{Rc, Weak};

use crate::input::TextInput;

pub trait TextFieldDelegate {
    fn should_begin_editing(&self, _field: &TextInput) -> bool {
        true
    }

    fn did_begin_editing(&self, _field: &TextInput) {}

    fn should_end_editing(&self, _field: &TextInput) -> bool {
        true
    }

    fn did_end_editing(&self, _field: &TextInput) {}

    /// `range` is a byte range of the current text about to be replaced.
    fn should_change_characters(
        &self,
        _field: &TextInput,
        _range: Range<usize>,
        _replacement: &str,
    ) -> bool {
        true
    }

    /// Clearing silently is opt-in.
    fn should_clear(&self, _field: &TextInput) -> bool {
        false
    }

    fn should_return(&self, _field: &TextInput) -> bool {
        true
    }
}

pub trait TextViewDelegate {
    fn should_begin_editing(&self, _view: &TextInput) -> bool {
        true
    }

    fn should_end_editing(&self, _view: &TextInput) -> bool {
        true
    }

    fn did_begin_editing(&self, _view: &TextInput) {}

    fn did_end_editing(&self, _view: &TextInput) {}

    fn should_change_text(&self, _view: &TextInput, _range: Range<usize>, _replacement: &str) -> bool {
        true
    }

    fn did_change(&self, _view: &TextInput) {}

    fn did_change_selection(&self, _view: &TextInput) {}

    fn should_interact_with_url(&self, _view: &TextInput, _url: &str, _range: Range<usize>) -> bool {
        true
    }
}

/// Stand-in used when no external delegate is installed (or it was dropped).
pub(crate) struct Detached;

impl TextFieldDelegate for Detached {}
impl TextViewDelegate for Detached {}

/// Non-owning slot for an external delegate.
pub(crate) struct DelegateSlot<D: ?Sized> {
    slot: RefCell<Option<Weak<D>>>,
    owner: &'static str,
}

impl<D: ?Sized> DelegateSlot<D> {
    pub(crate) fn new(owner: &'static str) -> Self {
        Self {
            slot: RefCell::new(None),
            owner,
        }
    }

    pub(crate) fn set(&self, delegate: Weak<D>) {
        *self.slot.borrow_mut() = Some(delegate);
    }

    pub(crate) fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }

    pub(crate) fn is_set(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Upgrades the delegate. A dropped delegate is forgotten after one warning.
    pub(crate) fn get(&self) -> Option<Rc<D>> {
        let mut slot = self.slot.borrow_mut();
        let weak = slot.as_ref()?;
        match weak.upgrade() {
            Some(delegate) => Some(delegate),
            None => {
                log::warn!("{} delegate was dropped; falling back to defaults", self.owner);
                *slot = None;
                None
            }
        }
    }
}
