use crate::error::ContainerError;
use crate::provider::{FactoryEntry, Instance, Provider};
use crate::scope::Scope;
use dashmap::DashMap;
use heritage_solver::{ClassStore, TypeExpr};
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::sync::Arc;
use tracing::{debug, trace};

/// Key to factory-index table, shared by every scope of one container.
struct FactoryTable {
    factories: Vec<FactoryEntry>,
    by_key: FxHashMap<TypeExpr, usize>,
}

/// Instances created in one scope activation, keyed by factory index.
struct ScopeCache {
    scope: Scope,
    instances: DashMap<usize, Instance, FxBuildHasher>,
}

impl ScopeCache {
    fn new(scope: Scope) -> Arc<Self> {
        Arc::new(Self {
            scope,
            instances: DashMap::with_hasher(FxBuildHasher),
        })
    }
}

/// Resolves instances by type key.
///
/// Each factory runs at most once per activation of its scope; every key
/// bound to that factory yields the same `Arc`.
pub struct Container {
    store: Arc<ClassStore>,
    table: Arc<FactoryTable>,
    /// Active scope caches, outermost first.
    chain: Vec<Arc<ScopeCache>>,
}

impl Container {
    /// Build the key table from `providers`. A key bound twice resolves to
    /// the later factory. `store` renders type names in errors.
    pub fn new(store: Arc<ClassStore>, providers: impl IntoIterator<Item = Provider>) -> Self {
        let mut factories = Vec::new();
        let mut by_key = FxHashMap::default();
        for provider in providers {
            for entry in provider.entries {
                let index = factories.len();
                for key in entry.provides.types() {
                    match by_key.insert(key.clone(), index) {
                        Some(previous) if previous != index => debug!(
                            key = %store.display(key),
                            previous,
                            index,
                            "factory overrides earlier binding"
                        ),
                        _ => {}
                    }
                }
                factories.push(entry);
            }
        }
        debug!(
            factories = factories.len(),
            keys = by_key.len(),
            "container built"
        );
        Self {
            store,
            table: Arc::new(FactoryTable { factories, by_key }),
            chain: vec![ScopeCache::new(Scope::App)],
        }
    }

    /// The innermost active scope.
    pub fn scope(&self) -> Scope {
        self.chain.last().map_or(Scope::App, |cache| cache.scope)
    }

    /// Open the next inner scope. The child shares the factory table and
    /// the caches of every enclosing scope.
    pub fn enter_scope(&self) -> Result<Container, ContainerError> {
        let current = self.scope();
        let next = current
            .child()
            .ok_or(ContainerError::NoChildScope { scope: current })?;
        let mut chain = self.chain.clone();
        chain.push(ScopeCache::new(next));
        trace!(scope = %next, "entered scope");
        Ok(Container {
            store: Arc::clone(&self.store),
            table: Arc::clone(&self.table),
            chain,
        })
    }

    /// The store that type keys were resolved against.
    pub fn store(&self) -> &ClassStore {
        &self.store
    }

    /// True if some factory is bound under `ty`.
    pub fn provides(&self, ty: &TypeExpr) -> bool {
        self.table.by_key.contains_key(ty)
    }

    /// Resolve the instance bound under `ty`.
    pub fn get<T>(&self, ty: &TypeExpr) -> Result<Arc<T>, ContainerError>
    where
        T: Send + Sync + 'static,
    {
        let &index = self
            .table
            .by_key
            .get(ty)
            .ok_or_else(|| ContainerError::NoFactory {
                ty: self.store.display(ty),
            })?;
        let entry = &self.table.factories[index];

        let cache = self
            .chain
            .iter()
            .find(|cache| cache.scope == entry.scope)
            .ok_or_else(|| ContainerError::ScopeMismatch {
                ty: self.store.display(ty),
                required: entry.scope,
                current: self.scope(),
            })?;

        let instance = cache
            .instances
            .entry(index)
            .or_insert_with(|| {
                trace!(index, ty = entry.type_name, "creating instance");
                (entry.create)()
            })
            .clone();

        instance
            .downcast::<T>()
            .map_err(|_| ContainerError::Downcast {
                ty: self.store.display(ty),
                expected: std::any::type_name::<T>(),
            })
    }
}

#[cfg(test)]
#[path = "../tests/container_tests.rs"]
mod tests;
