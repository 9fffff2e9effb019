// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/label.rs - 检测标签与标注区域
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

use crate::geometry::{NormalizedBox, PercentBox, PixelBox, to_percent, to_pixel};

/// 检测服务返回的单个实例
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBoxInstance {
  pub bbox: NormalizedBox,
}

/// 检测服务返回的标签，置信度范围为 [0, 100]
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLabel {
  pub name: String,
  pub confidence: f64,
  pub instances: Vec<BoundingBoxInstance>,
}

/// 展开后的标注区域，每个实例对应一个
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRegion {
  pub name: String,
  pub confidence: f64,
  pub pixel_box: PixelBox,
  pub percent_box: PercentBox,
}

impl AnnotatedRegion {
  /// 绘制在边框上方的标题文本
  pub fn caption(&self) -> String {
    format!("{} ({:.2}%)", self.name, self.confidence)
  }
}

/// 按标签顺序、再按实例顺序展开为标注区域。
///
/// 没有实例的标签不产生任何区域。
pub fn flatten(labels: &[DetectedLabel], width: u32, height: u32) -> Vec<AnnotatedRegion> {
  labels
    .iter()
    .flat_map(|label| {
      label.instances.iter().map(move |instance| AnnotatedRegion {
        name: label.name.clone(),
        confidence: label.confidence,
        pixel_box: to_pixel(&instance.bbox, width, height),
        percent_box: to_percent(&instance.bbox),
      })
    })
    .collect()
}
