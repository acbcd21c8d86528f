// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advice;
pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod currency;
pub mod merge;
pub mod models;
pub mod project;
pub mod store;
pub mod utils;
