// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugins compiled into the Atrium binary.

pub mod assets;
pub mod blog;
pub mod shop;
pub mod site;

pub use self::assets::AssetsPlugin;
pub use self::blog::{BlogPlugin, MemoryPostStore};
pub use self::shop::ShopPlugin;
pub use self::site::{CorePlugin, default_dashboard};
