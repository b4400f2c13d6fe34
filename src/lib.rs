// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod api;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod filter;
pub mod forms;
pub mod models;
pub mod paginate;
pub mod store;
pub mod utils;
pub mod view;
