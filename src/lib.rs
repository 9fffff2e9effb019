// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/lib.rs - 库主文件
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

use std::path::{Component, Path, PathBuf};

pub mod geometry;
pub mod input;
pub mod label;
pub mod model;
pub mod output;
pub mod task;

pub trait FromUrl {
  type Error;
  fn from_url(url: &url::Url) -> Result<Self, Self::Error>
  where
    Self: Sized;
}

pub trait FromUrlWithScheme: FromUrl {
  const SCHEME: &'static str;
}

/// 从 URL 中取出本地路径。
///
/// `folder:///data` 得到 `/data`，`folder://./data` 得到 `./data`。
pub fn url_path(url: &url::Url) -> PathBuf {
  let path = urlencoding::decode(url.path())
    .map(|p| p.into_owned())
    .unwrap_or_else(|_| url.path().to_string());
  match url.host_str() {
    Some(host) if !host.is_empty() => PathBuf::from(format!("{}{}", host, path)),
    _ => PathBuf::from(path),
  }
}

/// 拼接 `<root>/<bucket>/<key>`，bucket 或 key 试图跳出根目录时返回 `None`
pub fn object_path(root: &Path, bucket: &str, key: &str) -> Option<PathBuf> {
  let escapes = |s: &str| {
    Path::new(s)
      .components()
      .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
  };
  if bucket.is_empty() || key.is_empty() || escapes(bucket) || escapes(key) {
    return None;
  }
  Some(root.join(bucket).join(key))
}

#[cfg(test)]
mod tests {
  use super::*;
  use url::Url;

  #[test]
  fn url_path_absolute() {
    let url = Url::parse("folder:///data/buckets").unwrap();
    assert_eq!(url_path(&url), PathBuf::from("/data/buckets"));
  }

  #[test]
  fn url_path_relative() {
    let url = Url::parse("folder://./data").unwrap();
    assert_eq!(url_path(&url), PathBuf::from("./data"));
  }

  #[test]
  fn object_path_rejects_escapes() {
    let root = Path::new("/srv/storage");
    assert_eq!(
      object_path(root, "photos", "2024/cat.jpg"),
      Some(PathBuf::from("/srv/storage/photos/2024/cat.jpg"))
    );
    assert_eq!(object_path(root, "photos", "../cat.jpg"), None);
    assert_eq!(object_path(root, "/etc", "passwd"), None);
    assert_eq!(object_path(root, "", "cat.jpg"), None);
  }

  #[test]
  fn url_path_decodes_escapes() {
    let url = Url::parse("labels:///my%20responses").unwrap();
    assert_eq!(url_path(&url), PathBuf::from("/my responses"));
  }
}
