//! Composite animation broadcaster.
//!
//! Combines the Correct, Incorrect and Shaking pulses into one space-separated
//! class name for the outer shell container, and pushes it only when it
//! changes. Teardown pushes `None` exactly once and silences it for good.

use std::rc::Rc;

use tracing::trace;

use super::reaction::{PulseSet, Reactions};

/// The outer container whose class name reflects the composite animation.
pub trait ShellSink {
    fn set_shell_class_name(&self, class_name: Option<&str>);
}

impl<T: ShellSink + ?Sized> ShellSink for Rc<T> {
    fn set_shell_class_name(&self, class_name: Option<&str>) {
        (**self).set_shell_class_name(class_name)
    }
}

/// Space-join the present labels, skipping absent ones.
pub fn compose<'a>(labels: impl IntoIterator<Item = Option<&'a str>>) -> String {
    labels
        .into_iter()
        .flatten()
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct CompositeAnimationBroadcaster<H: ShellSink> {
    shell: H,
    /// Last value pushed; `None` until the first push.
    last: Option<String>,
    torn_down: bool,
}

impl<H: ShellSink> CompositeAnimationBroadcaster<H> {
    pub fn new(shell: H) -> Self {
        Self {
            shell,
            last: None,
            torn_down: false,
        }
    }

    /// Recompute from the composite pulses and push if the result changed.
    /// Returns true if something was pushed.
    pub fn update(&mut self, reactions: &Reactions) -> bool {
        let class_name = compose(reactions.active_labels(PulseSet::COMPOSITE).map(Some));
        self.push(class_name)
    }

    fn push(&mut self, class_name: String) -> bool {
        if self.torn_down || self.last.as_deref() == Some(class_name.as_str()) {
            return false;
        }

        trace!(class_name = %class_name, "pushing shell class name");
        self.shell.set_shell_class_name(Some(&class_name));
        self.last = Some(class_name);
        true
    }

    /// Push `None` once. Later calls, and later updates, do nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.last = None;
        trace!("clearing shell class name");
        self.shell.set_shell_class_name(None);
    }

    pub fn last_pushed(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn shell(&self) -> &H {
        &self.shell
    }
}
