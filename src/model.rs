// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/model.rs - 标签检测能力
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

use thiserror::Error;
use tracing::{error, info};

use crate::FromUrl;
use crate::label::DetectedLabel;

/// 最低置信度（百分比）
pub const MIN_CONFIDENCE: f64 = 70.0;
/// 最多保留的标签数
pub const MAX_LABELS: usize = 10;

mod response;
pub use self::response::{DetectLabelsResponse, ResponseError, parse_response};

pub trait LabelDetector {
  type Error: std::error::Error;

  /// 向检测服务请求标签，`min_confidence` 与 `max_labels` 作为请求参数传给服务
  fn request_labels(
    &self,
    bucket: &str,
    key: &str,
    min_confidence: f64,
    max_labels: usize,
  ) -> Result<Vec<DetectedLabel>, Self::Error>;

  /// 检测标签。失败时只记录日志并返回空列表。
  fn detect_labels(&self, bucket: &str, key: &str) -> Vec<DetectedLabel> {
    match self.request_labels(bucket, key, MIN_CONFIDENCE, MAX_LABELS) {
      Ok(labels) => {
        let labels = apply_limits(labels);
        info!("检测到 {} 个标签", labels.len());
        labels
      }
      Err(e) => {
        error!("处理图像时出错 ({}/{}): {}", bucket, key, e);
        Vec::new()
      }
    }
  }
}

/// 按固定阈值与上限过滤，保持原有顺序
pub fn apply_limits(labels: Vec<DetectedLabel>) -> Vec<DetectedLabel> {
  labels
    .into_iter()
    .filter(|label| label.confidence >= MIN_CONFIDENCE)
    .take(MAX_LABELS)
    .collect()
}

#[cfg(feature = "response_file")]
mod response_file;
#[cfg(feature = "response_file")]
pub use self::response_file::{ResponseFileDetector, ResponseFileDetectorError};

#[derive(Error, Debug)]
pub enum DetectorError {
  #[cfg(feature = "response_file")]
  #[error("响应文件检测器错误: {0}")]
  ResponseFileDetectorError(#[from] ResponseFileDetectorError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

pub enum DetectorWrapper {
  #[cfg(feature = "response_file")]
  ResponseFileDetector(ResponseFileDetector),
}

impl FromUrl for DetectorWrapper {
  type Error = DetectorError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    #[cfg(feature = "response_file")]
    {
      use crate::FromUrlWithScheme;

      if url.scheme() == ResponseFileDetector::SCHEME {
        let detector = ResponseFileDetector::from_url(url)?;
        return Ok(DetectorWrapper::ResponseFileDetector(detector));
      }
    }
    Err(DetectorError::SchemeMismatch(url.scheme().to_string()))
  }
}

impl LabelDetector for DetectorWrapper {
  type Error = DetectorError;

  fn request_labels(
    &self,
    bucket: &str,
    key: &str,
    min_confidence: f64,
    max_labels: usize,
  ) -> Result<Vec<DetectedLabel>, Self::Error> {
    match self {
      #[cfg(feature = "response_file")]
      DetectorWrapper::ResponseFileDetector(detector) => detector
        .request_labels(bucket, key, min_confidence, max_labels)
        .map_err(DetectorError::from),
    }
  }
}
