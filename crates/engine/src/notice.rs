//! Typed, non-blocking user notices.
//!
//! The engine queues notices; the presentation layer drains them, picks the
//! wording and decides how to show them. Nothing here blocks an operation.

use std::collections::VecDeque;
use std::time::Duration;

use arabesque_catalog::{ItemId, TierId};
use serde::Serialize;

use crate::store::Rejection;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
	#[default]
	Info,
	Warn,
	Error,
}

/// Controls automatic dismissal of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDismiss {
	/// Stays until the user closes it.
	Never,
	After(Duration),
}

impl AutoDismiss {
	pub const DEFAULT: Self = Self::After(Duration::from_secs(5));
}

impl Default for AutoDismiss {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoticeKind {
	/// The menu could not be loaded; menu building is disabled.
	CatalogUnavailable { reason: String },
	/// An item was not added because the tier's quota is reached.
	QuotaExceeded { max: u32 },
	/// A tier change was refused because the selection is too large for it.
	QuotaConflict { tier: TierId, excess: usize },
	/// An item was not added because no tier is chosen yet.
	NoActiveTier,
	/// A tier id did not resolve in the catalog.
	UnknownTier { tier: TierId },
	/// An item id exists in the catalog, but not under the requested category.
	UnknownItem { item: ItemId },
	/// The selection could not be saved and will be lost on reload.
	StorageUnavailable,
}

impl NoticeKind {
	pub fn level(&self) -> Level {
		match self {
			Self::CatalogUnavailable { .. } => Level::Error,
			Self::QuotaExceeded { .. } | Self::QuotaConflict { .. } | Self::StorageUnavailable => Level::Warn,
			Self::NoActiveTier | Self::UnknownTier { .. } | Self::UnknownItem { .. } => Level::Info,
		}
	}

	pub fn auto_dismiss(&self) -> AutoDismiss {
		match self {
			Self::CatalogUnavailable { .. } => AutoDismiss::Never,
			_ => AutoDismiss::DEFAULT,
		}
	}
}

/// A queued notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
	#[serde(flatten)]
	pub kind: NoticeKind,
	pub level: Level,
}

impl From<Rejection> for NoticeKind {
	fn from(rejection: Rejection) -> Self {
		match rejection {
			Rejection::NoActiveTier => Self::NoActiveTier,
			Rejection::QuotaExceeded { max } => Self::QuotaExceeded { max },
			Rejection::QuotaConflict { tier, excess } => Self::QuotaConflict { tier, excess },
			Rejection::UnknownItem { item } => Self::UnknownItem { item },
			Rejection::UnknownTier { tier } => Self::UnknownTier { tier },
		}
	}
}

impl From<NoticeKind> for Notice {
	fn from(kind: NoticeKind) -> Self {
		Self {
			level: kind.level(),
			kind,
		}
	}
}

/// Queue of notices waiting for the presentation layer.
#[derive(Debug, Default)]
pub struct NoticeCenter {
	pending: VecDeque<Notice>,
	storage_reported: bool,
}

impl NoticeCenter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}

	pub fn len(&self) -> usize {
		self.pending.len()
	}

	pub fn push(&mut self, notice: impl Into<Notice>) {
		let notice = notice.into();
		if notice.kind == NoticeKind::StorageUnavailable {
			// One per session; every later write would fail the same way.
			if self.storage_reported {
				return;
			}
			self.storage_reported = true;
		}
		self.pending.push_back(notice);
	}

	pub fn take_pending(&mut self) -> Vec<Notice> {
		self.pending.drain(..).collect()
	}

	pub fn clear(&mut self) {
		self.pending.clear();
	}
}
