//! 종가 선 그래프 렌더링.
//!
//! 제목, 축 라벨, 글꼴, 격자, 마이너스 기호 같은 표현 설정은 모두
//! [`RenderConfig`]로 받습니다. 결과는 SVG 문서입니다.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use std::path::Path;
use stockinfo_core::{PriceSeries, RenderConfig};
use tracing::info;

/// 종가 시계열을 SVG 문자열로 렌더링.
pub fn render_close_chart(series: &PriceSeries, config: &RenderConfig) -> Result<String> {
    let points = series.close_points();
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => bail!("차트로 그릴 가격 데이터가 없습니다"),
    };

    // 하루치 데이터도 그릴 수 있도록 X축 범위를 최소 하루로 둔다
    let x_end = if last > first {
        last
    } else {
        first
            .checked_add_days(Days::new(1))
            .ok_or_else(|| anyhow!("날짜 범위 오류: {}", first))?
    };

    let (low, high) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, close)| {
            (lo.min(*close), hi.max(*close))
        });
    let pad = ((high - low) * 0.05).max(1.0);

    let font = config.font_family.as_str();
    let line_color = RGBColor(config.line_rgb[0], config.line_rgb[1], config.line_rgb[2]);
    let ascii_minus = config.ascii_minus;
    let x_formatter = |date: &NaiveDate| date.format("%Y-%m").to_string();
    let y_formatter = |value: &f64| format_price(*value, ascii_minus);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                config.title.as_str(),
                (font, f64::from(config.title_font_size)),
            )
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(110)
            .build_cartesian_2d(first..x_end, (low - pad)..(high + pad))
            .map_err(draw_error)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .axis_desc_style((font, f64::from(config.label_font_size)))
            .label_style((font, f64::from(config.tick_font_size)))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter);
        if !config.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(draw_error)?;

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                line_color.stroke_width(2),
            ))
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    Ok(svg)
}

/// 차트를 SVG 파일로 저장.
pub fn write_close_chart(series: &PriceSeries, config: &RenderConfig, path: &Path) -> Result<()> {
    let svg = render_close_chart(series, config)?;
    std::fs::write(path, svg)
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;

    info!(path = %path.display(), points = series.len(), "차트 저장 완료");
    Ok(())
}

/// Y축 눈금 라벨 (천 단위 구분).
///
/// `ascii_minus`가 꺼져 있으면 음수 부호로 U+2212를 사용합니다.
pub fn format_price(value: f64, ascii_minus: bool) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        let minus = if ascii_minus { '-' } else { '\u{2212}' };
        format!("{}{}", minus, grouped)
    } else {
        grouped
    }
}

fn draw_error<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow!("차트 렌더링 실패: {}", e)
}
