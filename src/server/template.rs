// SHA3x Proxy - Free and Open Source Software Statement
//
// This project, sha3x-proxy, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/server/template.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file holds the block template summary shown by the stats endpoint,
// located in the server subdirectory. Fetching templates from the daemon is
// done elsewhere; the fetcher publishes into a BlockTemplateCell.
//
// Tree Location:
// - src/server/template.rs (block template source)
// - Depends on: parking_lot

use crate::core::types::BlockTemplate;
use parking_lot::RwLock;

/// Anything that can tell the current block height and network difficulty
pub trait BlockTemplateSource: Send + Sync {
    /// `None` until a template has been fetched
    fn current_template(&self) -> Option<BlockTemplate>;
}

/// Latest template published by the template fetcher
#[derive(Debug, Default)]
pub struct BlockTemplateCell {
    inner: RwLock<Option<BlockTemplate>>,
}

impl BlockTemplateCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, template: BlockTemplate) {
        *self.inner.write() = Some(template);
    }

    /// Forget the template, e.g. when the active upstream stops answering
    pub fn clear(&self) {
        *self.inner.write() = None;
    }
}

impl BlockTemplateSource for BlockTemplateCell {
    fn current_template(&self) -> Option<BlockTemplate> {
        *self.inner.read()
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial block template cell.
