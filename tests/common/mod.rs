// Common test utilities for error screen integration tests
//
// This module provides shared sample texts, messages and checks used by
// the wrapping and rendering test suites.

#![allow(dead_code)]

use duoscreen::display::{Color, PixelBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use duoscreen::error_screen::DiagnosticMessage;
use duoscreen::text::{is_wide_glyph, line_weight};

/// Wide-glyph width used by the shipped configuration
pub const WIDE_GLYPH_WIDTH: u32 = 150;

/// Texts covering plain prose, paths, CJK, mixed scripts and odd spacing
pub const SAMPLE_TEXTS: &[&str] = &[
    "Game Boy Advance BIOS not found",
    "Place bios7.bin, bios9.bin and firmware.bin in the system directory, then restart.",
    "see /home/user/.config/retroarch/system/melonDS/firmware/bios7.bin for details",
    "BIOSファイルが見つかりません。システムディレクトリに配置してください。",
    "펌웨어 파일을 찾을 수 없습니다 다시 시도하세요",
    "Mixed 日本語 text with  double  spaces\tand tabs",
    "  leading and trailing   ",
    "line one\nline two is a little longer\n\nafter a blank line",
    "a",
    "",
];

/// A typical startup failure
pub fn sample_message() -> DiagnosticMessage {
    DiagnosticMessage::new(
        "BIOS not found",
        "Place bios7.bin, bios9.bin and firmware.bin in the system directory, then restart.",
    )
}

/// Every non-whitespace character of `text`, in order
pub fn non_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check whether a wrapped line is a single unbreakable atom
pub fn is_single_atom(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => true,
        Some(first) if is_wide_glyph(first) => chars.next().is_none(),
        Some(_) => !trimmed.contains(|c: char| c.is_whitespace() || is_wide_glyph(c)),
    }
}

/// Assert that every line fits the budget, unless it is a single oversize atom
pub fn assert_within_budget(wrapped: &str, line_width: usize, wide_glyph_width: u32) {
    for line in wrapped.split('\n') {
        let weight = line_weight(line, wide_glyph_width);
        assert!(
            weight <= line_width * 100 || is_single_atom(line),
            "Line {:?} weighs {} but the budget is {}",
            line,
            weight,
            line_width * 100
        );
    }
}

/// A screen-sized buffer where every pixel differs from its neighbors
pub fn patterned_screen(seed: u8) -> PixelBuffer {
    let mut buffer = PixelBuffer::screen(Color::BLACK);
    for y in 0..SCREEN_HEIGHT {
        for x in 0..SCREEN_WIDTH {
            let color = Color::rgb(x as u8, y as u8, seed.wrapping_add((x ^ y) as u8));
            buffer.set_pixel(x, y, color);
        }
    }
    buffer
}

/// Unique scratch directory for a test
pub fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("duoscreen-it-{}-{}", name, std::process::id()))
}
