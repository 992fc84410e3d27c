// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Pattern linking validation
//!
//! A node may not directly follow a node, and an edge may not directly follow
//! an edge.

use super::{Clause, ClauseKind};

/// True if a clause of `new_kind` may be appended after `history`
pub fn is_linking_valid(history: &[Clause], new_kind: ClauseKind) -> bool {
    match history.last() {
        None => true,
        Some(last) => last.kind() != new_kind,
    }
}
