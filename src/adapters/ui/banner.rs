//! ASCII banner with gradient (TG-SHOP).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Indigo (#6366f1), the storefront accent color.
const INDIGO: (u8, u8, u8) = (0x63, 0x66, 0xf1);
/// Mint (#34d399).
const MINT: (u8, u8, u8) = (0x34, 0xd3, 0x99);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "TG-SHOP" in figlet ASCII with a gradient from
/// indigo to mint, then version.
pub fn print_welcome() {
    let art = match FIGfont::standard() {
        Ok(font) => font.convert("TG-SHOP").map(|figure| figure.to_string()),
        Err(_) => None,
    };
    let art = match art {
        Some(art) => art,
        None => "TG-SHOP\n".to_string(),
    };

    let mut out = stdout();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(INDIGO, MINT, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: MINT.0,
        g: MINT.1,
        b: MINT.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("Demo storefront, orders go to your Telegram bot\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
