// 该文件是 Biaoqian （标签标注） 项目的一部分。
// src/output/draw.rs - 标注区域可视化
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

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::{
  drawing::{draw_hollow_rect_mut, draw_text_mut, text_size},
  rect::Rect,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::label::AnnotatedRegion;

// 边框样式，固定不可配置
const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]); // 红色
const BOX_LINE_WIDTH: i32 = 2;

// 标题文本常量
const CAPTION_FONT_SIZE: f32 = 14.0;
const CAPTION_CHAR_WIDTH: f32 = 7.0; // 无字体时按字符数估算宽度
const CAPTION_PADDING: i32 = 2;
const CAPTION_GAP: i32 = 2;
const CAPTION_TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]); // 黑色
const CAPTION_BACKGROUND: [u8; 3] = [255, 255, 255];
const CAPTION_BACKGROUND_ALPHA: f32 = 0.5;

/// 未指定字体时依次尝试的系统字体
pub const SYSTEM_FONT_PATHS: &[&str] = &[
  "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
  "/usr/share/fonts/dejavu/DejaVuSans.ttf",
  "/usr/share/fonts/TTF/DejaVuSans.ttf",
  "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
  "/usr/share/fonts/noto/NotoSans-Regular.ttf",
  "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
  "/System/Library/Fonts/Supplemental/Arial.ttf",
  "/Library/Fonts/Arial.ttf",
  "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Error, Debug)]
pub enum RenderError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
  #[error("字体无效: {0}")]
  InvalidFont(#[from] ab_glyph::InvalidFont),
}

pub struct Renderer {
  font: Option<FontVec>,
  font_size: f32,
}

/// 默认不加载字体，不读取任何文件
impl Default for Renderer {
  fn default() -> Self {
    Self::new(None)
  }
}

impl Renderer {
  /// 使用给定字体；`None` 时只绘制标题背景
  pub fn new(font: Option<FontVec>) -> Self {
    Self {
      font,
      font_size: CAPTION_FONT_SIZE,
    }
  }

  pub fn with_font_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let font = FontVec::try_from_vec(data)?;
    info!("加载字体: {}", path.display());
    Ok(Self::new(Some(font)))
  }

  pub fn with_system_font() -> Self {
    for path in SYSTEM_FONT_PATHS {
      if !Path::new(path).is_file() {
        continue;
      }
      match Self::with_font_file(path) {
        Ok(renderer) => return renderer,
        Err(e) => debug!("跳过字体 {}: {}", path, e),
      }
    }
    warn!("未找到可用字体，标题文字将不会绘制");
    Self::new(None)
  }

  pub fn has_font(&self) -> bool {
    self.font.is_some()
  }

  /// 在图像副本上按顺序绘制所有区域，原图不变
  pub fn render(&self, image: &RgbImage, regions: &[AnnotatedRegion]) -> RgbImage {
    let mut canvas = image.clone();
    for region in regions {
      self.draw_region(&mut canvas, region);
    }
    canvas
  }

  /// 以 PNG 格式保存，已存在的文件会被覆盖
  pub fn save(&self, image: &RgbImage, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    image.save_with_format(path, ImageFormat::Png)?;

    info!("图像已保存: {}", path.display());

    Ok(())
  }

  fn draw_region(&self, image: &mut RgbImage, region: &AnnotatedRegion) {
    let bbox = &region.pixel_box;
    // f64 -> i64 饱和转换，超大坐标不会溢出
    let x = bbox.x.round() as i64;
    let y = bbox.y.round() as i64;
    let w = bbox.w.round() as i64;
    let h = bbox.h.round() as i64;

    // 边框向内加粗
    for t in 0..BOX_LINE_WIDTH as i64 {
      let left = x.saturating_add(t);
      let top = y.saturating_add(t);
      let right = x.saturating_add(w).saturating_sub(t);
      let bottom = y.saturating_add(h).saturating_sub(t);
      if right <= left || bottom <= top {
        break;
      }
      if let Some(rect) = clip_to_canvas(image, left, top, right, bottom) {
        draw_hollow_rect_mut(image, rect, BOX_COLOR);
      }
    }

    let caption = region.caption();
    let scale = PxScale::from(self.font_size);
    let (text_width, text_height) = match &self.font {
      Some(font) => {
        let (tw, _) = text_size(scale, font, &caption);
        // 按行高留出空间，下行字符不会越出背景
        let line_height = font.as_scaled(scale).height().ceil();
        (tw as i64, line_height as i64)
      }
      None => (
        (caption.chars().count() as f32 * CAPTION_CHAR_WIDTH) as i64,
        self.font_size.ceil() as i64,
      ),
    };

    // 标题背景位于边框上方
    let padding = CAPTION_PADDING as i64;
    let background_width = text_width + 2 * padding;
    let background_height = text_height + 2 * padding;
    let background_x = x;
    let background_y = y
      .saturating_sub(background_height)
      .saturating_sub(CAPTION_GAP as i64);
    blend_rect_mut(
      image,
      background_x,
      background_y,
      background_width,
      background_height,
      CAPTION_BACKGROUND,
      CAPTION_BACKGROUND_ALPHA,
    );

    let Some(font) = &self.font else {
      return;
    };
    let text_x = background_x.saturating_add(padding);
    let text_y = background_y.saturating_add(padding);
    let (iw, ih) = (image.width() as i64, image.height() as i64);
    if text_x >= iw
      || text_y >= ih
      || text_x.saturating_add(text_width) <= 0
      || text_y.saturating_add(text_height) <= 0
    {
      debug!("标题 {} 位于画布之外", caption);
      return;
    }
    draw_text_mut(
      image,
      CAPTION_TEXT_COLOR,
      text_x as i32,
      text_y as i32,
      scale,
      font,
      &caption,
    );
  }
}

/// 把 `[left, right) x [top, bottom)` 限制到画布外扩一个线宽的范围内。
///
/// 被截断的边落在画布外，不会画出；完全不可见时返回 `None`。
fn clip_to_canvas(image: &RgbImage, left: i64, top: i64, right: i64, bottom: i64) -> Option<Rect> {
  let margin = BOX_LINE_WIDTH as i64;
  let (iw, ih) = (image.width() as i64, image.height() as i64);
  let left = left.max(-margin);
  let top = top.max(-margin);
  let right = right.min(iw + margin);
  let bottom = bottom.min(ih + margin);
  if right <= left || bottom <= top {
    return None;
  }
  Some(Rect::at(left as i32, top as i32).of_size((right - left) as u32, (bottom - top) as u32))
}

/// 半透明填充矩形，只处理落在图像内的像素
fn blend_rect_mut(
  image: &mut RgbImage,
  x: i64,
  y: i64,
  width: i64,
  height: i64,
  color: [u8; 3],
  alpha: f32,
) {
  let (iw, ih) = (image.width() as i64, image.height() as i64);
  let x0 = x.clamp(0, iw);
  let y0 = y.clamp(0, ih);
  let x1 = x.saturating_add(width).clamp(0, iw);
  let y1 = y.saturating_add(height).clamp(0, ih);

  for py in y0..y1 {
    for px in x0..x1 {
      let pixel = image.get_pixel_mut(px as u32, py as u32);
      for c in 0..3 {
        let blended = pixel[c] as f32 * (1.0 - alpha) + color[c] as f32 * alpha;
        pixel[c] = blended.round().clamp(0.0, 255.0) as u8;
      }
    }
  }
}
