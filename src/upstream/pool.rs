// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/upstream/pool.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the prioritized upstream list with an atomically
// switched "current" selector, located in the upstream subdirectory. The
// node list is fixed at construction; only the index moves.
//
// Tree Location:
// - src/upstream/pool.rs (upstream selection and failover)
// - Depends on: node, thiserror, log

use super::node::{UpstreamNode, UpstreamView};
use crate::core::config::UpstreamSettings;
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

const LOG_TARGET: &str = "sha3x::proxy::upstream";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    #[error("Upstream pool needs at least one node")]
    Empty,

    #[error("Upstream index {index} is out of range (pool has {len} nodes)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Upstream view plus whether it is the active node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamEntry {
    #[serde(flatten)]
    pub view: UpstreamView,
    pub current: bool,
}

#[derive(Debug)]
pub struct UpstreamPool {
    nodes: Vec<Arc<UpstreamNode>>,
    current: AtomicUsize,
}

impl UpstreamPool {
    /// Build a pool with the first node selected
    pub fn new(nodes: Vec<UpstreamNode>) -> Result<Self, UpstreamError> {
        if nodes.is_empty() {
            return Err(UpstreamError::Empty);
        }
        Ok(Self {
            nodes: nodes.into_iter().map(Arc::new).collect(),
            current: AtomicUsize::new(0),
        })
    }

    pub fn from_settings(settings: &[UpstreamSettings]) -> Result<Self, UpstreamError> {
        Self::new(settings.iter().map(UpstreamNode::from_settings).collect())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; kept alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Arc<UpstreamNode>] {
        &self.nodes
    }

    pub fn get(&self, index: usize) -> Option<&Arc<UpstreamNode>> {
        self.nodes.get(index)
    }

    /// Switch the active upstream
    pub fn select(&self, index: usize) -> Result<(), UpstreamError> {
        if index >= self.nodes.len() {
            return Err(UpstreamError::IndexOutOfRange {
                index,
                len: self.nodes.len(),
            });
        }
        self.current.store(index, Ordering::Release);
        debug!(target: LOG_TARGET, "Selected upstream #{} ({})", index, self.nodes[index].name);
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.current.load(Ordering::Acquire)
    }

    /// Handle to the active upstream
    pub fn current(&self) -> Arc<UpstreamNode> {
        // select() never stores an out-of-range index
        Arc::clone(&self.nodes[self.current_index()])
    }

    /// Views of every node, with `current` computed from one load of the index.
    pub fn snapshot_all(&self) -> Vec<UpstreamEntry> {
        let current = self.current_index();
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| UpstreamEntry {
                view: node.snapshot(),
                current: i == current,
            })
            .collect()
    }

    /// Make the first healthy node in priority order the active one.
    ///
    /// Keeps the current selection when every node is sick. Returns the index
    /// that is active afterwards.
    pub fn failover(&self) -> usize {
        let current = self.current_index();
        let Some(healthy) = self.nodes.iter().position(|node| !node.sick()) else {
            warn!(target: LOG_TARGET,
                "All {} upstreams are sick, staying on {}",
                self.nodes.len(), self.nodes[current].name
            );
            return current;
        };

        if healthy != current {
            self.current.store(healthy, Ordering::Release);
            warn!(target: LOG_TARGET,
                "Switching upstream from {} to {}",
                self.nodes[current].name, self.nodes[healthy].name
            );
        }
        healthy
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial upstream pool.
//   - Atomic current-index selection, snapshot with a single current flag,
//     first-healthy failover.
