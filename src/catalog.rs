//! # Catalog Store
//!
//! In-memory persistence collaborator for collections and products. Assigns
//! server-side ids, keeps referential integrity between products and their
//! collections, and computes `products_count` at read time.
//!
//! All mutations happen under a single write lock, so referential checks and
//! the mutation they guard are atomic with respect to concurrent requests.
//! A relational backend can replace this type without touching the access
//! gate or the handlers.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use thiserror::Error;

use crate::models::{Collection, Product, ProductDraft, ProductPatch};

/// Errors from catalog operations. All are expected, user-facing outcomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Collection {0} does not exist")]
    CollectionNotFound(i64),

    #[error("Product {0} does not exist")]
    ProductNotFound(i64),

    #[error("Collection {id} still contains {products} product(s)")]
    CollectionInUse { id: i64, products: usize },
}

#[derive(Debug, Default)]
struct CatalogState {
    collections: BTreeMap<i64, Collection>,
    products: BTreeMap<i64, Product>,
    next_collection_id: i64,
    next_product_id: i64,
}

impl CatalogState {
    fn products_count(&self, collection_id: i64) -> i64 {
        self.products
            .values()
            .filter(|p| p.collection == collection_id)
            .count() as i64
    }
}

/// Thread-safe in-memory catalog.
#[derive(Debug, Default)]
pub struct CatalogStore {
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- collections ----

    /// Create a collection, assigning the next id (ids start at 1).
    pub fn create_collection(&self, title: String) -> Collection {
        let mut state = self.state.write();
        state.next_collection_id += 1;
        let collection = Collection {
            id: state.next_collection_id,
            title,
        };
        state
            .collections
            .insert(collection.id, collection.clone());
        collection
    }

    /// Fetch a collection together with its derived product count.
    pub fn collection_with_count(&self, id: i64) -> Option<(Collection, i64)> {
        let state = self.state.read();
        let collection = state.collections.get(&id)?.clone();
        let count = state.products_count(id);
        Some((collection, count))
    }

    /// List all collections with their derived product counts, ordered by id.
    pub fn collections_with_counts(&self) -> Vec<(Collection, i64)> {
        let state = self.state.read();
        state
            .collections
            .values()
            .map(|c| (c.clone(), state.products_count(c.id)))
            .collect()
    }

    pub fn collection_exists(&self, id: i64) -> bool {
        self.state.read().collections.contains_key(&id)
    }

    /// Replace a collection's title, returning the updated entity and its count.
    pub fn replace_collection(
        &self,
        id: i64,
        title: String,
    ) -> Result<(Collection, i64), CatalogError> {
        let mut state = self.state.write();
        let collection = state
            .collections
            .get_mut(&id)
            .ok_or(CatalogError::CollectionNotFound(id))?;
        collection.title = title;
        let updated = collection.clone();
        let count = state.products_count(id);
        Ok((updated, count))
    }

    /// Merge a partial update into an existing collection. Omitted fields keep
    /// their prior values. Read and write happen under one lock acquisition,
    /// so an empty patch can never clobber a concurrent replace.
    pub fn merge_collection(
        &self,
        id: i64,
        title: Option<String>,
    ) -> Result<(Collection, i64), CatalogError> {
        let mut state = self.state.write();
        let collection = state
            .collections
            .get_mut(&id)
            .ok_or(CatalogError::CollectionNotFound(id))?;
        if let Some(title) = title {
            collection.title = title;
        }
        let updated = collection.clone();
        let count = state.products_count(id);
        Ok((updated, count))
    }

    /// Delete a collection. Restricted: a collection still referenced by
    /// products cannot be removed.
    pub fn delete_collection(&self, id: i64) -> Result<(), CatalogError> {
        let mut state = self.state.write();
        if !state.collections.contains_key(&id) {
            return Err(CatalogError::CollectionNotFound(id));
        }
        let products = state
            .products
            .values()
            .filter(|p| p.collection == id)
            .count();
        if products > 0 {
            return Err(CatalogError::CollectionInUse { id, products });
        }
        state.collections.remove(&id);
        Ok(())
    }

    // ---- products ----

    /// Persist a validated product draft, assigning the next id.
    ///
    /// The referenced collection is re-checked under the write lock; the
    /// validation gate checks it too, but the lock-held check is the one that
    /// guarantees the invariant against concurrent collection deletes.
    pub fn create_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let mut state = self.state.write();
        if !state.collections.contains_key(&draft.collection) {
            return Err(CatalogError::CollectionNotFound(draft.collection));
        }
        state.next_product_id += 1;
        let product = draft.into_product(state.next_product_id);
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    pub fn product(&self, id: i64) -> Option<Product> {
        self.state.read().products.get(&id).cloned()
    }

    /// List all products, ordered by id.
    pub fn products(&self) -> Vec<Product> {
        self.state.read().products.values().cloned().collect()
    }

    pub fn product_exists(&self, id: i64) -> bool {
        self.state.read().products.contains_key(&id)
    }

    /// Full replace of an existing product with a validated draft.
    pub fn replace_product(&self, id: i64, draft: ProductDraft) -> Result<Product, CatalogError> {
        let mut state = self.state.write();
        if !state.products.contains_key(&id) {
            return Err(CatalogError::ProductNotFound(id));
        }
        if !state.collections.contains_key(&draft.collection) {
            return Err(CatalogError::CollectionNotFound(draft.collection));
        }
        let product = draft.into_product(id);
        state.products.insert(id, product.clone());
        Ok(product)
    }

    /// Merge a partial update into an existing product. Omitted fields keep
    /// their prior values.
    pub fn merge_product(&self, id: i64, patch: ProductPatch) -> Result<Product, CatalogError> {
        let mut state = self.state.write();
        if let Some(collection) = patch.collection {
            if !state.collections.contains_key(&collection) {
                return Err(CatalogError::CollectionNotFound(collection));
            }
        }
        let product = state
            .products
            .get_mut(&id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        if let Some(title) = patch.title {
            product.title = title;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(slug) = patch.slug {
            product.slug = slug;
        }
        if let Some(inventory) = patch.inventory {
            product.inventory = inventory;
        }
        if let Some(unit_price) = patch.unit_price {
            product.unit_price = unit_price;
        }
        if let Some(collection) = patch.collection {
            product.collection = collection;
        }
        Ok(product.clone())
    }

    pub fn delete_product(&self, id: i64) -> Result<(), CatalogError> {
        let mut state = self.state.write();
        state
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(CatalogError::ProductNotFound(id))
    }
}
