// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod models;
pub mod search;
pub mod session;
pub mod storage;
pub mod store;
pub mod utils;
pub mod validate;
