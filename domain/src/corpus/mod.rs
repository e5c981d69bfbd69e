//! The known question → answer table.

pub mod entities;
