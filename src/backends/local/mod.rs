// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod atoms;
pub mod factory;

pub use atoms::*;
pub use factory::LocalAtomFactory;
