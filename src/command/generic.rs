// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Free-form command for the outward command-execution service.

use crate::command::{Command, CommandParam};

/// A command built from a raw name and argument list.
///
/// The bridge exposes an execute-command service that forwards arbitrary
/// vendor commands; this type carries them without interpretation.
///
/// # Examples
///
/// ```
/// use tahoma_bridge::command::{Command, GenericCommand};
///
/// let cmd = GenericCommand::new("setClosure").with_arg(25i64);
/// assert_eq!(cmd.name(), "setClosure");
/// assert_eq!(cmd.parameters().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenericCommand {
    name: String,
    args: Vec<CommandParam>,
}

impl GenericCommand {
    /// Creates a command with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<CommandParam>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Replaces the argument list.
    #[must_use]
    pub fn with_args(mut self, args: Vec<CommandParam>) -> Self {
        self.args = args;
        self
    }
}

impl Command for GenericCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Vec<CommandParam> {
        self.args.clone()
    }
}
