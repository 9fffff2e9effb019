// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/input.rs - 对象存储输入
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

use image::RgbImage;
use thiserror::Error;
use tracing::{debug, error};

use crate::FromUrl;

/// 对象存储读取能力：按 (bucket, key) 取回原始字节
pub trait ImageSource {
  type Error: std::error::Error;

  fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, Self::Error>;

  /// 取回并解码图像。
  ///
  /// 任何读取或解码失败都只记录日志并返回 `None`，调用方据此跳过后续渲染。
  fn fetch_image(&self, bucket: &str, key: &str) -> Option<RgbImage> {
    let data = match self.fetch_object(bucket, key) {
      Ok(data) => data,
      Err(e) => {
        error!("获取图像失败 ({}/{}): {}", bucket, key, e);
        return None;
      }
    };
    debug!("读取到 {} 字节", data.len());

    match image::load_from_memory(&data) {
      Ok(image) => Some(image.to_rgb8()),
      Err(e) => {
        error!("解码图像失败 ({}/{}): {}", bucket, key, e);
        None
      }
    }
  }
}

#[cfg(feature = "folder_storage")]
mod folder_storage;
#[cfg(feature = "folder_storage")]
pub use self::folder_storage::{FolderStorage, FolderStorageError};

#[derive(Error, Debug)]
pub enum StorageError {
  #[cfg(feature = "folder_storage")]
  #[error("目录存储错误: {0}")]
  FolderStorageError(#[from] FolderStorageError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

pub enum StorageWrapper {
  #[cfg(feature = "folder_storage")]
  FolderStorage(FolderStorage),
}

impl FromUrl for StorageWrapper {
  type Error = StorageError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    #[cfg(feature = "folder_storage")]
    {
      use crate::FromUrlWithScheme;

      if url.scheme() == FolderStorage::SCHEME {
        let storage = FolderStorage::from_url(url)?;
        return Ok(StorageWrapper::FolderStorage(storage));
      }
    }
    Err(StorageError::SchemeMismatch(url.scheme().to_string()))
  }
}

impl ImageSource for StorageWrapper {
  type Error = StorageError;

  fn fetch_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, Self::Error> {
    match self {
      #[cfg(feature = "folder_storage")]
      StorageWrapper::FolderStorage(storage) => storage
        .fetch_object(bucket, key)
        .map_err(StorageError::from),
    }
  }
}
