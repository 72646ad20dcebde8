use crate::error::ContainerError;
use crate::scope::Scope;
use heritage_solver::{ClassStore, Provides, TypeExpr, with_parents};
use std::any::Any;
use std::sync::Arc;

pub(crate) type Instance = Arc<dyn Any + Send + Sync>;
pub(crate) type FactoryFn = Arc<dyn Fn() -> Instance + Send + Sync>;

/// One registered factory and every key it answers.
pub(crate) struct FactoryEntry {
    pub(crate) scope: Scope,
    pub(crate) provides: Provides,
    pub(crate) create: FactoryFn,
    pub(crate) type_name: &'static str,
}

/// A group of factories sharing one scope.
pub struct Provider {
    scope: Scope,
    pub(crate) entries: Vec<FactoryEntry>,
}

impl Provider {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            entries: Vec::new(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Bind `factory` under every type named by `provides`.
    pub fn provide<T, F>(mut self, provides: impl Into<Provides>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.entries.push(FactoryEntry {
            scope: self.scope,
            provides: provides.into(),
            create: Arc::new(move || Arc::new(factory()) as Instance),
            type_name: std::any::type_name::<T>(),
        });
        self
    }

    /// Bind `factory` under `expr` and every ancestor of it.
    pub fn provide_with_parents<T, F>(
        self,
        store: &ClassStore,
        expr: &TypeExpr,
        factory: F,
    ) -> Result<Self, ContainerError>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let provides = with_parents(store, expr)?;
        tracing::debug!(
            ty = %store.display(expr),
            keys = provides.types().len(),
            scope = %self.scope,
            "provide with parents"
        );
        Ok(self.provide(provides, factory))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
