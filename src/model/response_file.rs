// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/model/response_file.rs - 回放已保存的检测服务响应
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
use tracing::{debug, info};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  label::DetectedLabel,
  model::{LabelDetector, ResponseError, parse_response},
  object_path, url_path,
};

#[derive(Error, Debug)]
pub enum ResponseFileDetectorError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("非法的对象路径: {0}/{1}")]
  InvalidKey(String, String),
  #[error("读取响应文件 {} 失败: {}", .0.display(), .1)]
  IoError(PathBuf, std::io::Error),
  #[error("{0}")]
  ResponseError(#[from] ResponseError),
}

/// 从 `<root>/<bucket>/<key>.json` 读取 DetectLabels 响应
#[derive(Debug, Clone)]
pub struct ResponseFileDetector {
  root: PathBuf,
}

impl FromUrlWithScheme for ResponseFileDetector {
  const SCHEME: &'static str = "labels";
}

impl FromUrl for ResponseFileDetector {
  type Error = ResponseFileDetectorError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(ResponseFileDetectorError::SchemeMismatch(format!(
        "期望检测方式 '{}', 实际检测方式 '{}'",
        Self::SCHEME,
        url.scheme()
      )));
    }

    Ok(ResponseFileDetector::new(url_path(url)))
  }
}

impl ResponseFileDetector {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn response_path(&self, bucket: &str, key: &str) -> Result<PathBuf, ResponseFileDetectorError> {
    object_path(&self.root, bucket, &format!("{}.json", key)).ok_or_else(|| {
      ResponseFileDetectorError::InvalidKey(bucket.to_string(), key.to_string())
    })
  }
}

impl LabelDetector for ResponseFileDetector {
  type Error = ResponseFileDetectorError;

  fn request_labels(
    &self,
    bucket: &str,
    key: &str,
    min_confidence: f64,
    max_labels: usize,
  ) -> Result<Vec<DetectedLabel>, Self::Error> {
    let path = self.response_path(bucket, key)?;
    info!("读取检测响应: {}", path.display());
    debug!("请求参数: 最低置信度 {}, 最多 {} 个标签", min_confidence, max_labels);

    let data = std::fs::read(&path).map_err(|e| ResponseFileDetectorError::IoError(path, e))?;
    let labels = parse_response(&data)?;
    Ok(labels)
  }
}
