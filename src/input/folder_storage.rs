// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/input/folder_storage.rs - 本地目录形式的对象存储
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, input::ImageSource, object_path, url_path};

#[derive(Error, Debug)]
pub enum FolderStorageError {
  #[error("URI schema mismatch")]
  SchemaMismatch,
  #[error("非法的对象路径: {0}/{1}")]
  InvalidKey(String, String),
  #[error("读取对象 {} 失败: {}", .0.display(), .1)]
  IoError(PathBuf, std::io::Error),
}

/// 以目录模拟对象存储：`<root>/<bucket>/<key>`
#[derive(Debug, Clone)]
pub struct FolderStorage {
  root: PathBuf,
}

impl FromUrlWithScheme for FolderStorage {
  const SCHEME: &'static str = "folder";
}

impl FromUrl for FolderStorage {
  type Error = FolderStorageError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(FolderStorageError::SchemaMismatch);
    }

    Ok(FolderStorage::new(url_path(url)))
  }
}

impl FolderStorage {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, FolderStorageError> {
    object_path(&self.root, bucket, key)
      .ok_or_else(|| FolderStorageError::InvalidKey(bucket.to_string(), key.to_string()))
  }
}

impl ImageSource for FolderStorage {
  type Error = FolderStorageError;

  fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, Self::Error> {
    let path = self.object_path(bucket, key)?;
    info!("读取对象: {}", path.display());
    std::fs::read(&path).map_err(|e| FolderStorageError::IoError(path, e))
  }
}
