// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/geometry.rs - 归一化坐标到像素坐标/百分比坐标的转换
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

/// 归一化边界框，各字段为相对图像宽高的比例，原点在左上角
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBox {
  pub left: f64,
  pub top: f64,
  pub width: f64,
  pub height: f64,
}

/// 像素坐标下的边界框
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBox {
  pub x: f64,
  pub y: f64,
  pub w: f64,
  pub h: f64,
}

/// 百分比坐标下的边界框（名义范围 0 - 100）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentBox {
  pub left: f64,
  pub top: f64,
  pub width: f64,
  pub height: f64,
}

impl NormalizedBox {
  pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
    Self {
      left,
      top,
      width,
      height,
    }
  }
}

/// 将归一化框映射到 `width` x `height` 的像素空间。
///
/// 不做裁剪也不做校验，超出 [0, 1] 的输入会原样传递到结果中。
pub fn to_pixel(bbox: &NormalizedBox, width: u32, height: u32) -> PixelBox {
  let (w, h) = (width as f64, height as f64);
  PixelBox {
    x: bbox.left * w,
    y: bbox.top * h,
    w: bbox.width * w,
    h: bbox.height * h,
  }
}

pub fn to_percent(bbox: &NormalizedBox) -> PercentBox {
  PercentBox {
    left: bbox.left * 100.0,
    top: bbox.top * 100.0,
    width: bbox.width * 100.0,
    height: bbox.height * 100.0,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const EPS: f64 = 1e-9;

  #[test]
  fn to_pixel_scales_by_image_size() {
    let bbox = NormalizedBox::new(0.25, 0.5, 0.5, 0.25);
    let pixel = to_pixel(&bbox, 640, 480);
    assert_eq!(
      pixel,
      PixelBox {
        x: 160.0,
        y: 240.0,
        w: 320.0,
        h: 120.0,
      }
    );
  }

  #[test]
  fn to_percent_scales_by_hundred() {
    let bbox = NormalizedBox::new(0.1, 0.2, 0.3, 0.4);
    let percent = to_percent(&bbox);
    assert!((percent.left - 10.0).abs() < EPS);
    assert!((percent.top - 20.0).abs() < EPS);
    assert!((percent.width - 30.0).abs() < EPS);
    assert!((percent.height - 40.0).abs() < EPS);
  }

  #[test]
  fn out_of_range_boxes_pass_through() {
    let bbox = NormalizedBox::new(-0.1, 0.9, 0.5, 1.2);
    let pixel = to_pixel(&bbox, 100, 200);
    assert!((pixel.x + 10.0).abs() < EPS);
    assert!((pixel.y - 180.0).abs() < EPS);
    assert!((pixel.w - 50.0).abs() < EPS);
    assert!((pixel.h - 240.0).abs() < EPS);

    let percent = to_percent(&bbox);
    assert!((percent.left + 10.0).abs() < EPS);
    assert!((percent.height - 120.0).abs() < EPS);
  }

  #[test]
  fn percent_matches_pixel_over_dimension() {
    let bbox = NormalizedBox::new(0.123, 0.456, 0.321, 0.222);
    let (width, height) = (1920, 1080);
    let pixel = to_pixel(&bbox, width, height);
    let percent = to_percent(&bbox);
    assert!((pixel.x / width as f64 * 100.0 - percent.left).abs() < 1e-6);
    assert!((pixel.y / height as f64 * 100.0 - percent.top).abs() < 1e-6);
    assert!((pixel.w / width as f64 * 100.0 - percent.width).abs() < 1e-6);
    assert!((pixel.h / height as f64 * 100.0 - percent.height).abs() < 1e-6);
  }
}
