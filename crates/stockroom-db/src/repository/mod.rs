//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  StockroomService                                                      │
//! │       │                                                                 │
//! │       │  db.products().adjust_stock_checked(id, -4)                    │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, product)                                            │
//! │  ├── update(&self, product)                                            │
//! │  └── adjust_stock_checked(&self, id, delta)                            │
//! │       │                                                                 │
//! │       │  SQL statement (atomic)                                        │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Can swap the backing store without touching the service             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`brand::BrandRepository`] - Brand CRUD (cascades via foreign keys)
//! - [`category::CategoryRepository`] - Category CRUD
//! - [`product::ProductRepository`] - Product CRUD and atomic stock updates
//! - [`order::OrderRepository`] - Orders with embedded item snapshots

pub mod brand;
pub mod category;
pub mod order;
pub mod product;
