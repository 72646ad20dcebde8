//! Scoped dependency-injection container with multi-bind registration.
//!
//! A [`Provider`] collects factories, each bound under one or more
//! [`TypeExpr`] keys. [`Provider::provide_with_parents`] computes the
//! ancestor closure of a type and binds the factory under every entry, so a
//! single instance answers lookups for the type and all of its ancestors.
//! The container keeps the [`ClassStore`](heritage_solver::ClassStore) so
//! errors can name types in source form.
//!
//! ```
//! use heritage_container::{Container, Provider, Scope};
//! use heritage_solver::ClassStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(ClassStore::new());
//! store.type_var("T").unwrap();
//! store.declare("str", &[]).unwrap();
//! store.declare("Repo", &["Generic[T]"]).unwrap();
//! store.declare("UserRepo", &["Repo[str]"]).unwrap();
//!
//! let user_repo = store.parse("UserRepo").unwrap();
//! let provider = Provider::new(Scope::App)
//!     .provide_with_parents(&store, &user_repo, || String::from("users"))
//!     .unwrap();
//! let container = Container::new(Arc::clone(&store), [provider]);
//!
//! let a = container.get::<String>(&user_repo).unwrap();
//! let b = container.get::<String>(&store.parse("Repo[str]").unwrap()).unwrap();
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! ```

mod container;
mod error;
mod provider;
mod scope;

pub use container::Container;
pub use error::ContainerError;
pub use heritage_solver::{Provides, TypeExpr};
pub use provider::Provider;
pub use scope::Scope;
