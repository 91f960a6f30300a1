// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confirmation gate for critical commands.
//!
//! A two-state machine: `Idle`, or `Awaiting` with exactly one pending
//! command. While a command is pending, the very next utterance is
//! intercepted before it can reach the interpreter, so a second critical
//! command can never be classified on top of the first. There is no
//! timeout; the gate waits for the next reply indefinitely.

use odyssey_core::types::InterpretedCommand;

/// The fixed affirmative vocabulary. Matching is case-insensitive and
/// substring-based; anything that matches none of these cancels.
pub const AFFIRMATIVE_TOKENS: [&str; 3] = ["evet", "onayla", "doğru"];

/// Holds at most one pending critical command.
#[derive(Debug, Default)]
pub enum ConfirmationGate {
    #[default]
    Idle,
    Awaiting(InterpretedCommand),
}

/// What the gate decided about an intercepted reply.
#[derive(Debug, PartialEq)]
pub enum GateDecision {
    /// Nothing was pending; the reply belongs to the interpreter.
    NotPending,
    /// Affirmative reply: run the pending command.
    Execute(InterpretedCommand),
    /// Anything else: discard the pending command.
    Cancelled,
}

impl ConfirmationGate {
    pub fn is_pending(&self) -> bool {
        matches!(self, ConfirmationGate::Awaiting(_))
    }

    /// Arms the gate with a critical command awaiting confirmation.
    /// A pending command is replaced, but the orchestrator's interception
    /// order means that can never happen in practice.
    pub fn arm(&mut self, command: InterpretedCommand) {
        *self = ConfirmationGate::Awaiting(command);
    }

    /// Resolves the pending command against the user's next reply. The gate
    /// returns to `Idle` on every reply, whatever the decision.
    pub fn intercept(&mut self, reply: &str) -> GateDecision {
        match std::mem::take(self) {
            ConfirmationGate::Idle => GateDecision::NotPending,
            ConfirmationGate::Awaiting(command) => {
                if is_affirmative(reply) {
                    GateDecision::Execute(command)
                } else {
                    GateDecision::Cancelled
                }
            }
        }
    }
}

fn is_affirmative(reply: &str) -> bool {
    let reply = reply.to_lowercase();
    AFFIRMATIVE_TOKENS.iter().any(|token| reply.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use odyssey_core::types::{CommandAction, CommandParams};

    fn critical() -> InterpretedCommand {
        InterpretedCommand {
            action: CommandAction::CompleteMission,
            is_critical: true,
            params: CommandParams::default(),
        }
    }

    #[test]
    fn idle_gate_does_not_intercept() {
        let mut gate = ConfirmationGate::default();
        assert!(!gate.is_pending());
        assert_eq!(gate.intercept("evet"), GateDecision::NotPending);
    }

    #[test]
    fn affirmative_replies_execute_and_clear() {
        for reply in ["evet", "Evet yapalım", "ONAYLA", "bence doğru"] {
            let mut gate = ConfirmationGate::default();
            gate.arm(critical());
            assert!(gate.is_pending());

            match gate.intercept(reply) {
                GateDecision::Execute(cmd) => {
                    assert_eq!(cmd.action, CommandAction::CompleteMission)
                }
                other => panic!("expected Execute for {reply:?}, got {other:?}"),
            }
            assert!(!gate.is_pending());
        }
    }

    #[test]
    fn anything_else_cancels_and_clears() {
        for reply in ["hayır", "belki", "iptal", "ne?"] {
            let mut gate = ConfirmationGate::default();
            gate.arm(critical());
            assert_eq!(gate.intercept(reply), GateDecision::Cancelled, "{reply:?}");
            assert!(!gate.is_pending());
        }
    }
}
