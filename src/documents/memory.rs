// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Map-backed document source for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Connectivity, DocumentError, DocumentSource};

#[derive(Clone, Default)]
pub struct InMemoryDocuments {
    documents: Arc<RwLock<HashMap<i32, Vec<u8>>>>,
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, case_id: i32, document: Vec<u8>) {
        self.documents.write().await.insert(case_id, document);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentSource for InMemoryDocuments {
    async fn fetch_document(&self, case_id: i32) -> Result<Option<Vec<u8>>, DocumentError> {
        let documents = self.documents.read().await;
        Ok(documents.get(&case_id).filter(|d| !d.is_empty()).cloned())
    }

    async fn probe(&self) -> Connectivity {
        Connectivity::reachable("Connected (in-memory)")
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
