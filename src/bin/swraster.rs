use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use swraster::{
    ArcDsc, Area, BlendMode, Color32, ColorFormat, DrawCtx, FadeMask, FontMetrics, GlyphDsc,
    GradDir, ImageBuf, ImgDsc, LineDsc, OPA_50, OPA_COVER, PixelColor, Point, RasterOpts,
    RectDsc, ShadowDsc, Surface,
};

#[derive(Parser, Debug)]
#[command(name = "swraster", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one rounded, bordered, shadowed rectangle as a PNG.
    Rect(RectArgs),
    /// Render a fixed scene that exercises every composer.
    Showcase(ShowcaseArgs),
    /// Print the effective raster options as JSON.
    Opts(OptsArgs),
}

#[derive(Parser, Debug)]
struct RectArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width.
    #[arg(long, default_value_t = 200)]
    width: u32,

    /// Canvas height.
    #[arg(long, default_value_t = 140)]
    height: u32,

    /// Corner radius.
    #[arg(long, default_value_t = 16)]
    radius: i32,

    /// Border width.
    #[arg(long, default_value_t = 3)]
    border: i32,

    /// Shadow blur width (0 disables the shadow).
    #[arg(long, default_value_t = 12)]
    shadow: i32,

    /// Background color, `RRGGBB`.
    #[arg(long, default_value = "3366cc", value_parser = parse_rgb)]
    bg: [u8; 3],

    /// Gradient end color, `RRGGBB`; enables a vertical gradient.
    #[arg(long, value_parser = parse_rgb)]
    grad: Option<[u8; 3]>,

    /// Border color, `RRGGBB`.
    #[arg(long, default_value = "f0f0f0", value_parser = parse_rgb)]
    border_color: [u8; 3],

    /// Raster options JSON file.
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ShowcaseArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Raster options JSON file.
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OptsArgs {
    /// Raster options JSON file; environment overrides apply otherwise.
    #[arg(long)]
    opts: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Rect(args) => cmd_rect(args),
        Command::Showcase(args) => cmd_showcase(args),
        Command::Opts(args) => cmd_opts(args),
    }
}

fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected RRGGBB, got '{s}'"));
    }
    let v = u32::from_str_radix(hex, 16).map_err(|e| format!("bad color '{s}': {e}"))?;
    Ok([(v >> 16) as u8, (v >> 8) as u8, v as u8])
}

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb8(c[0], c[1], c[2])
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<RasterOpts> {
    let Some(path) = path else {
        return Ok(RasterOpts::from_env());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read raster opts '{}'", path.display()))?;
    Ok(RasterOpts::from_json(&text)?)
}

/// An RGB canvas the composers draw into.
struct Canvas {
    px: Vec<Color32>,
    area: Area,
}

impl Canvas {
    fn new(w: u32, h: u32, bg: Color32) -> anyhow::Result<Self> {
        anyhow::ensure!(w > 0 && h > 0, "canvas size {w}x{h} is empty");
        Ok(Self {
            px: vec![bg; w as usize * h as usize],
            area: Area::from_size(0, 0, w as i32, h as i32),
        })
    }

    fn surface(&mut self) -> anyhow::Result<Surface<'_, Color32>> {
        Ok(Surface::new(&mut self.px, self.area)?)
    }

    fn save_png(&self, out: &Path) -> anyhow::Result<()> {
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let data: Vec<u8> = self
            .px
            .iter()
            .flat_map(|c| {
                let [r, g, b] = c.to_rgb8();
                [r, g, b, 255]
            })
            .collect();
        image::save_buffer_with_format(
            out,
            &data,
            self.area.width() as u32,
            self.area.height() as u32,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
        Ok(())
    }
}

fn cmd_rect(args: RectArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.opts.as_deref())?;
    let mut ctx = DrawCtx::new(opts);
    let mut canvas = Canvas::new(args.width, args.height, Color32::from_rgb8(18, 20, 28))?;
    let clip = canvas.area;

    let margin = args.shadow.max(0) + 8;
    let coords = clip.inflate(-margin);
    anyhow::ensure!(!coords.is_empty(), "canvas too small for a {margin}px margin");

    let dsc = RectDsc {
        radius: args.radius,
        bg_color: rgb(args.bg),
        bg_grad_color: rgb(args.grad.unwrap_or(args.bg)),
        bg_grad_dir: if args.grad.is_some() {
            GradDir::Vertical
        } else {
            GradDir::None
        },
        border_width: args.border,
        border_color: rgb(args.border_color),
        shadow: (args.shadow > 0).then(|| ShadowDsc {
            color: Color32::black(),
            width: args.shadow,
            ofs_x: 0,
            ofs_y: args.shadow / 3,
            spread: 0,
            opa: OPA_COVER,
        }),
        ..RectDsc::default()
    };
    swraster::draw_rect(&mut ctx, &mut canvas.surface()?, &clip, &coords, &dsc);
    canvas.save_png(&args.out)
}

const GLYPH_A: [u8; 8] = [
    0b0001_1000,
    0b0010_0100,
    0b0100_0010,
    0b0100_0010,
    0b0111_1110,
    0b0100_0010,
    0b0100_0010,
    0b0000_0000,
];

/// The 1 bpp glyph above re-encoded at 4 bpp with a soft edge column.
fn glyph_a_4bpp() -> Vec<u8> {
    let mut out = Vec::with_capacity(32);
    for row in GLYPH_A {
        for pair in 0..4 {
            let hi = (row >> (7 - pair * 2)) & 1;
            let lo = (row >> (6 - pair * 2)) & 1;
            out.push(((hi * 0xF) << 4) | (lo * 0xA));
        }
    }
    out
}

fn checker_image() -> anyhow::Result<ImageBuf<Color32>> {
    let mut img = ImageBuf::<Color32>::alloc(24, 24, ColorFormat::TrueColorAlpha)?;
    for y in 0..24 {
        for x in 0..24 {
            let on = ((x / 6) + (y / 6)) % 2 == 0;
            let c = if on {
                Color32::from_rgb8(240, 190, 40)
            } else {
                Color32::from_rgb8(40, 160, 220)
            };
            img.set_px_color(x, y, c)?;
            img.set_px_alpha(x, y, if on { OPA_COVER } else { 200 })?;
        }
    }
    Ok(img)
}

fn cmd_showcase(args: ShowcaseArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.opts.as_deref())?;
    let mut ctx = DrawCtx::new(opts);
    let mut canvas = Canvas::new(320, 200, Color32::from_rgb8(18, 20, 28))?;
    let clip = canvas.area;
    let mut surf = canvas.surface()?;

    let card = RectDsc {
        radius: 14,
        bg_color: Color32::from_rgb8(60, 90, 200),
        bg_grad_color: Color32::from_rgb8(20, 30, 90),
        bg_grad_dir: GradDir::Vertical,
        border_width: 2,
        border_color: Color32::white(),
        shadow: Some(ShadowDsc {
            color: Color32::black(),
            width: 16,
            ofs_x: 4,
            ofs_y: 6,
            spread: 0,
            opa: OPA_COVER,
        }),
        ..RectDsc::default()
    };
    swraster::draw_rect(&mut ctx, &mut surf, &clip, &Area::new(16, 16, 150, 110), &card);

    let pill = RectDsc {
        radius: i32::MAX,
        bg_color: Color32::from_rgb8(220, 60, 90),
        bg_grad_color: Color32::from_rgb8(250, 170, 60),
        bg_grad_dir: GradDir::Horizontal,
        ..RectDsc::default()
    };
    swraster::draw_rect(&mut ctx, &mut surf, &clip, &Area::new(170, 20, 300, 50), &pill);

    let arc = ArcDsc {
        color: Color32::from_rgb8(90, 220, 140),
        width: 8,
        rounded: true,
        ..ArcDsc::default()
    };
    swraster::draw_arc(&mut ctx, &mut surf, &clip, Point::new(235, 120), 40, 135, 45, &arc);

    let line = LineDsc {
        color: Color32::from_rgb8(250, 250, 250),
        width: 3,
        round_start: true,
        round_end: true,
        ..LineDsc::default()
    };
    swraster::draw_line(&mut ctx, &mut surf, &clip, Point::new(20, 180), Point::new(150, 130), &line);

    let img = checker_image()?;
    let img_dsc = ImgDsc {
        angle: 30,
        opa: OPA_COVER,
        ..ImgDsc::default()
    };
    swraster::draw_img(&mut ctx, &mut surf, &clip, &Area::from_size(40, 40, 24, 24), &img, &img_dsc);

    // glyphs fade out towards the bottom of the card
    let fade = FadeMask::new(Area::new(80, 40, 150, 110), OPA_COVER, 60, OPA_50, 100);
    let fade_id = ctx.masks_mut().add(fade, None);
    let metrics = FontMetrics {
        line_height: 12,
        base_line: 2,
    };
    let g1 = GlyphDsc {
        box_w: 8,
        box_h: 8,
        ofs_x: 0,
        ofs_y: 0,
        bpp: 1,
        subpixel: false,
    };
    let g4 = GlyphDsc { bpp: 4, ..g1 };
    let a4 = glyph_a_4bpp();
    for (i, (glyph, bitmap)) in [(g1, &GLYPH_A[..]), (g4, &a4[..])].into_iter().enumerate() {
        swraster::draw_letter(
            &mut ctx,
            &mut surf,
            &clip,
            Point::new(90 + i as i32 * 12, 70),
            &glyph,
            bitmap,
            &metrics,
            Color32::white(),
            OPA_COVER,
            BlendMode::Normal,
        );
    }
    if let Some(id) = fade_id {
        ctx.masks_mut().remove(id);
    }

    drop(surf);
    canvas.save_png(&args.out)
}

fn cmd_opts(args: OptsArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.opts.as_deref())?;
    let json = serde_json::to_string_pretty(&opts).context("serialize raster opts")?;
    println!("{json}");
    Ok(())
}
