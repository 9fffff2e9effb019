// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/model/response.rs - 检测服务响应的解析与校验
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

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::geometry::NormalizedBox;
use crate::label::{BoundingBoxInstance, DetectedLabel};

#[derive(Error, Debug)]
pub enum ResponseError {
  #[error("响应格式错误: 缺少字段 {0}")]
  MalformedResponse(String),
  #[error("JSON 解析错误: {0}")]
  JsonError(#[from] serde_json::Error),
}

// 字段全部可选，缺失时在 `into_labels` 中报告具体位置

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectLabelsResponse {
  #[serde(default)]
  labels: Vec<LabelEntry>,
  label_model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LabelEntry {
  name: Option<String>,
  confidence: Option<f64>,
  #[serde(default)]
  instances: Vec<InstanceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceEntry {
  bounding_box: Option<BoxEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BoxEntry {
  left: Option<f64>,
  top: Option<f64>,
  width: Option<f64>,
  height: Option<f64>,
}

fn required<T>(value: Option<T>, path: impl FnOnce() -> String) -> Result<T, ResponseError> {
  value.ok_or_else(|| ResponseError::MalformedResponse(path()))
}

impl BoxEntry {
  fn into_box(self, at: &str) -> Result<NormalizedBox, ResponseError> {
    Ok(NormalizedBox {
      left: required(self.left, || format!("{}.Left", at))?,
      top: required(self.top, || format!("{}.Top", at))?,
      width: required(self.width, || format!("{}.Width", at))?,
      height: required(self.height, || format!("{}.Height", at))?,
    })
  }
}

impl DetectLabelsResponse {
  pub fn label_model_version(&self) -> Option<&str> {
    self.label_model_version.as_deref()
  }

  /// 校验并转换为 [`DetectedLabel`] 列表，保持响应中的顺序
  pub fn into_labels(self) -> Result<Vec<DetectedLabel>, ResponseError> {
    self
      .labels
      .into_iter()
      .enumerate()
      .map(|(i, entry)| -> Result<DetectedLabel, ResponseError> {
        let at = format!("Labels[{}]", i);
        let name = required(entry.name, || format!("{}.Name", at))?;
        let confidence = required(entry.confidence, || format!("{}.Confidence", at))?;
        let instances = entry
          .instances
          .into_iter()
          .enumerate()
          .map(|(j, instance)| -> Result<BoundingBoxInstance, ResponseError> {
            let at = format!("{}.Instances[{}].BoundingBox", at, j);
            let bbox = required(instance.bounding_box, || at.clone())?.into_box(&at)?;
            Ok(BoundingBoxInstance { bbox })
          })
          .collect::<Result<Vec<_>, _>>()?;
        Ok(DetectedLabel {
          name,
          confidence,
          instances,
        })
      })
      .collect()
  }
}

/// 解析 DetectLabels 形式的 JSON 响应
pub fn parse_response(data: &[u8]) -> Result<Vec<DetectedLabel>, ResponseError> {
  let response: DetectLabelsResponse = serde_json::from_slice(data)?;
  if let Some(version) = response.label_model_version() {
    debug!("标签模型版本: {}", version);
  }
  response.into_labels()
}
