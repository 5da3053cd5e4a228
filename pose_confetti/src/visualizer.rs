//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    confetti (plane space)                │
//! │        ┌──────────────────────────────────┐              │
//! │        │  camera image region             │              │
//! │        │     keypoints + hand markers     │              │
//! │        └──────────────────────────────────┘              │
//! │  status bar                                              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The view is centred on the plane origin and zoomed out so bursts stay
//! on screen well above the camera image.

use std::sync::mpsc::Sender;

use confetti_burst::palette::rgb_to_argb;
use hand_gesture::{CoordTransform, HandState, ImageToPlane, Side, Vec2};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::app::AppState;
use crate::error::AppError;
use crate::source::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:       usize = 960;
pub const WIN_H:       usize = 720;
/// Screen pixels per plane unit.
const VIEW_SCALE:      f32   = 0.6;
/// Plane origin sits this far below the window centre.
const VIEW_DROP:       f32   = 120.0;
const STATUS_Y:        usize = WIN_H - 36;
const BG_COLOR:        u32   = 0xFF1A1A2E;
const FRAME_COLOR:     u32   = 0xFF0F3460;
const KEYPOINT_COLOR:  u32   = 0xFF66CCFF;
const TEXT_BG:         u32   = 0xFF0F3460;
const PIECE_W:         f32   = 8.0;
const PIECE_H:         f32   = 4.0;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:    Window,
    buf:       Vec<u32>,
    sim_tx:    Sender<SimInput>,
    transform: ImageToPlane,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>, transform: ImageToPlane) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Pose Confetti",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            transform,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll mouse and keyboard and forward them as [`SimInput`] events.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        if self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
        {
            return false;
        }
        if self.window.is_key_pressed(Key::Space, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::ToggleBody);
        }

        if let Some((sx, sy)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let position = self.transform.to_image(screen_to_plane(sx, sy));
            let _ = self.sim_tx.send(SimInput::Pointer {
                position,
                left:  self.window.get_mouse_down(MouseButton::Left),
                right: self.window.get_mouse_down(MouseButton::Right),
            });
        }

        true
    }

    /// Render one frame.  `now` is the clock's elapsed time, used to turn
    /// each piece's spin rate into a tumble angle.
    pub fn render(&mut self, app: &AppState, now: f64) {
        // Clear
        self.buf.fill(BG_COLOR);

        // ── Camera image frame ────────────────────────────────────────────
        self.draw_image_frame();

        // ── Keypoint overlay ──────────────────────────────────────────────
        let floor = app.tracker().config().min_kpt_confidence;
        if let Some(pose) = app.last_pose() {
            for kp in pose.keypoints().iter().filter(|k| k.score >= floor) {
                let (x, y) = plane_to_screen(self.transform.apply(kp.position()));
                self.draw_diamond(x, y, 3, KEYPOINT_COLOR);
            }
        }

        // ── Hand markers ──────────────────────────────────────────────────
        for side in Side::BOTH {
            let hand = app.tracker().hand(side);
            if hand.state() == HandState::NoPose {
                continue;
            }
            let (x, y) = plane_to_screen(hand.position());
            self.fill_rect_i(x - 6, y - 6, 12, 12, state_color(hand.state()));
        }

        // ── Confetti ──────────────────────────────────────────────────────
        for side in Side::BOTH {
            let pool = app.confetti().pool(side);
            for p in pool.arena().iter().filter(|p| p.alpha > 0.0) {
                let age = pool.group(p.group).map_or(0.0, |g| (now - g.start_time) as f32);
                // Pieces tumble about their axis; the visible width follows.
                let flip = (p.spin.rate * age).cos().abs().max(0.15);
                let w = (PIECE_W * p.width_scale * flip * VIEW_SCALE).max(1.0);
                let h = (PIECE_H * VIEW_SCALE).max(1.0);
                let (x, y) = plane_to_screen(Vec2::new(p.position.x, p.position.y));
                self.blend_rect(x, y, w as isize, h as isize, rgb_to_argb(p.color), p.alpha);
            }
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_label(&app.status, 10, STATUS_Y + 10, 0xFFEEEEEE);

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(
            "hold lmb/rmb=move hand  space=toggle body  q=quit",
            10, WIN_H - 16, 0xFF888888,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    fn draw_image_frame(&mut self) {
        let (x0, y0) = plane_to_screen(self.transform.apply(Vec2::ZERO));
        let (x1, y1) = plane_to_screen(
            self.transform.apply(Vec2::new(self.transform.width, self.transform.height)),
        );
        if x0 < 0 || y0 < 0 || x1 <= x0 || y1 <= y0 { return; }
        self.draw_border(x0 as usize, y0 as usize, (x1 - x0) as usize, (y1 - y0) as usize, FRAME_COLOR);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(WIN_H) {
            for col in x..(x+w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    /// `fill_rect` for rectangles that may start off screen.
    fn fill_rect_i(&mut self, x: isize, y: isize, w: isize, h: isize, color: u32) {
        let (x0, y0) = (x.max(0), y.max(0));
        let (x1, y1) = (x + w, y + h);
        if x1 <= x0 || y1 <= y0 { return; }
        self.fill_rect(x0 as usize, y0 as usize, (x1 - x0) as usize, (y1 - y0) as usize, color);
    }

    /// Centred rectangle blended over what is already drawn.
    fn blend_rect(&mut self, cx: isize, cy: isize, w: isize, h: isize, color: u32, alpha: f32) {
        let (x0, y0) = ((cx - w / 2).max(0), (cy - h / 2).max(0));
        let x1 = (cx - w / 2 + w).min(WIN_W as isize);
        let y1 = (cy - h / 2 + h).min(STATUS_Y as isize);
        for row in y0..y1 {
            for col in x0..x1 {
                let i = row as usize * WIN_W + col as usize;
                self.buf[i] = blend(self.buf[i], color, alpha);
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        for col in x..(x+w).min(WIN_W) {
            if y < WIN_H           { self.buf[y           * WIN_W + col] = color; }
            if y+h-1 < WIN_H       { self.buf[(y+h-1)     * WIN_W + col] = color; }
        }
        for row in y..(y+h).min(WIN_H) {
            if x < WIN_W           { self.buf[row * WIN_W + x    ] = color; }
            if x+w-1 < WIN_W       { self.buf[row * WIN_W + x+w-1] = color; }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    fn draw_diamond(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        for dy in 0..=r {
            let dx = r - dy;
            for &(sx, sy) in &[
                (cx + dx, cy + dy),
                (cx - dx, cy + dy),
                (cx + dx, cy - dy),
                (cx - dx, cy - dy),
            ] {
                if sx >= 0 && sy >= 0 {
                    self.set_pixel(sx as usize, sy as usize, color);
                }
            }
        }
    }

    /// Minimal 3×5 bitmap font, each glyph 5 rows of 3 bits.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View mapping
// ────────────────────────────────────────────────────────────────────────────

/// Plane point → screen pixel (may be off screen).
pub fn plane_to_screen(p: Vec2) -> (isize, isize) {
    let x = WIN_W as f32 * 0.5 + p.x * VIEW_SCALE;
    let y = WIN_H as f32 * 0.5 + VIEW_DROP - p.y * VIEW_SCALE;
    (x.round() as isize, y.round() as isize)
}

/// Screen pixel → plane point.
pub fn screen_to_plane(sx: f32, sy: f32) -> Vec2 {
    Vec2::new(
        (sx - WIN_W as f32 * 0.5) / VIEW_SCALE,
        (WIN_H as f32 * 0.5 + VIEW_DROP - sy) / VIEW_SCALE,
    )
}

fn state_color(state: HandState) -> u32 {
    match state {
        HandState::NoPose  => 0xFF555555,
        HandState::Default => 0xFFEEEEEE,
        HandState::Up      => 0xFFFFD700,
        HandState::Stopped => 0xFFDC143C,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b111, 0b001, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t).round() as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}
