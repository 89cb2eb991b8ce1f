// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-kind run state.

use lc_core::OperationKind;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
}

lc_core::simple_display! {
    RunStatus {
        Idle => "idle",
        Running => "running",
    }
}

/// Published view of one operation kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationState {
    pub kind: OperationKind,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct OperationSlot {
    /// Calls of this kind that have not settled yet
    pub(crate) in_flight: usize,
    pub(crate) last_error: Option<String>,
}

impl OperationSlot {
    pub(crate) fn status(&self) -> RunStatus {
        if self.in_flight > 0 {
            RunStatus::Running
        } else {
            RunStatus::Idle
        }
    }
}

/// One slot per [`OperationKind`], indexed densely.
#[derive(Debug, Clone, Default)]
pub(crate) struct OperationSlots {
    slots: [OperationSlot; 4],
}

impl OperationSlots {
    pub(crate) fn states(&self) -> Vec<OperationState> {
        OperationKind::ALL
            .iter()
            .map(|&kind| OperationState {
                kind,
                status: self[kind].status(),
                last_error: self[kind].last_error.clone(),
            })
            .collect()
    }
}

impl Index<OperationKind> for OperationSlots {
    type Output = OperationSlot;

    fn index(&self, kind: OperationKind) -> &OperationSlot {
        &self.slots[kind.index()]
    }
}

impl IndexMut<OperationKind> for OperationSlots {
    fn index_mut(&mut self, kind: OperationKind) -> &mut OperationSlot {
        &mut self.slots[kind.index()]
    }
}
