// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Statement metadata
//!
//! This module handles:
//! - Struct schemas registered ahead of time
//! - Property path resolution against those schemas
//! - Parameter descriptors and the per-statement type resolution cache

pub mod registry;
pub mod resolver;
pub mod parameter;

pub use registry::{FieldDef, StructSchema, TypeRegistry};
pub use resolver::{PropertyPathResolver, SchemaPathResolver};
pub use parameter::{ParameterDescriptor, ParameterDescriptorContext};
