// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advice;
pub mod assets;
pub mod auth;
pub mod budgets;
pub mod doctor;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod journal;
pub mod reports;
pub mod transactions;
