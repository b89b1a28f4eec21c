use std::collections::HashSet;
use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::menu::{
    BlockDraft, CreatedPage, MenuItemId, MenuRecord, MenuSnapshot,
};

/// Errors reported by the remote menu store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("menu service unavailable: {0}")]
    Unavailable(String),
    #[error("menu service rejected the request: {0}")]
    Rejected(String),
    #[error("unknown menu item {0}")]
    UnknownItem(MenuItemId),
}

/// Remote menu store consumed by the sidebar runtime.
///
/// Every call completes asynchronously; the runtime feeds the result back
/// into the sidebar as a new event.
pub trait MenuService {
    fn fetch_menu_items(
        &mut self,
    ) -> impl Future<Output = Result<MenuSnapshot, ServiceError>>;

    fn create_page(
        &mut self,
        parent: Option<&MenuItemId>,
        name: &str,
    ) -> impl Future<Output = Result<CreatedPage, ServiceError>>;

    fn create_block(
        &mut self,
        block: &BlockDraft,
    ) -> impl Future<Output = Result<(), ServiceError>>;

    fn update_menu_items(
        &mut self,
        records: &[MenuRecord],
    ) -> impl Future<Output = Result<(), ServiceError>>;
}

/// Remote operation selector used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOp {
    Fetch,
    CreatePage,
    CreateBlock,
    Update,
}

/// Menu store kept in process memory.
///
/// Serves the command-line driver and the test suite. Records are stored
/// flat, the way the remote schema keeps them.
#[derive(Debug, Default)]
pub struct InMemoryMenuService {
    records: Vec<MenuRecord>,
    blocks: Vec<BlockDraft>,
    updates: Vec<Vec<MenuRecord>>,
    failing: HashSet<ServiceOp>,
}

impl InMemoryMenuService {
    pub fn new(records: Vec<MenuRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn from_snapshot(snapshot: MenuSnapshot) -> Self {
        Self::new(snapshot.into_records())
    }

    /// Make the next call of `op` fail once.
    pub fn fail_next(&mut self, op: ServiceOp) {
        self.failing.insert(op);
    }

    pub fn records(&self) -> &[MenuRecord] {
        &self.records
    }

    pub fn blocks(&self) -> &[BlockDraft] {
        &self.blocks
    }

    /// Payloads received by `update_menu_items`, in call order.
    pub fn updates(&self) -> &[Vec<MenuRecord>] {
        &self.updates
    }

    fn check(&mut self, op: ServiceOp) -> Result<(), ServiceError> {
        if self.failing.remove(&op) {
            return Err(ServiceError::Unavailable(format!("{op:?} failed")));
        }
        Ok(())
    }

    fn record(&self, id: &MenuItemId) -> Option<&MenuRecord> {
        self.records.iter().find(|record| record.id == *id)
    }
}

impl MenuService for InMemoryMenuService {
    async fn fetch_menu_items(&mut self) -> Result<MenuSnapshot, ServiceError> {
        self.check(ServiceOp::Fetch)?;
        Ok(MenuSnapshot::Flat {
            items: self.records.clone(),
        })
    }

    async fn create_page(
        &mut self,
        parent: Option<&MenuItemId>,
        name: &str,
    ) -> Result<CreatedPage, ServiceError> {
        self.check(ServiceOp::CreatePage)?;
        if name.trim().is_empty() {
            return Err(ServiceError::Rejected(String::from(
                "page name must not be empty",
            )));
        }

        let id = MenuItemId::new(Uuid::new_v4().to_string());
        let path = match parent.and_then(|parent| self.record(parent)) {
            Some(parent) => {
                format!("{}/{id}", parent.path.trim_end_matches('/'))
            },
            None => format!("/page/{id}"),
        };
        let weight = self
            .records
            .iter()
            .filter(|record| record.parent.as_ref() == parent)
            .map(|record| record.weight)
            .max()
            .map_or(1, |max| max.saturating_add(1));

        self.records.push(MenuRecord {
            id: id.clone(),
            parent: parent.cloned(),
            weight,
            name: String::from(name),
            title: String::from(name),
            path: path.clone(),
            icon_component_name: None,
        });
        log::debug!("created page {id} at {path}");

        Ok(CreatedPage {
            id,
            name: String::from(name),
            title: None,
            path: Some(path),
        })
    }

    async fn create_block(
        &mut self,
        block: &BlockDraft,
    ) -> Result<(), ServiceError> {
        self.check(ServiceOp::CreateBlock)?;
        if self.record(&block.parent).is_none() {
            return Err(ServiceError::UnknownItem(block.parent.clone()));
        }
        self.blocks.push(block.clone());
        Ok(())
    }

    async fn update_menu_items(
        &mut self,
        records: &[MenuRecord],
    ) -> Result<(), ServiceError> {
        self.check(ServiceOp::Update)?;
        if let Some(unknown) =
            records.iter().find(|record| self.record(&record.id).is_none())
        {
            return Err(ServiceError::UnknownItem(unknown.id.clone()));
        }

        for update in records {
            if let Some(stored) =
                self.records.iter_mut().find(|record| record.id == update.id)
            {
                *stored = update.clone();
            }
        }
        self.updates.push(records.to_vec());
        Ok(())
    }
}
