use image::error::ImageError;

use quadtree_palette::{metrics, Color, PaletteTree, Quadtree};

use std::fs;

use tracing_subscriber::EnvFilter;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// How the quadtree gets compressed.
enum Compression {
	Lambda(u32),
	Phi(usize),
}

fn setup_logging(verbosity: u64) {
	let level = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn parse_colors(values: Option<clap::Values<'_>>, what: &str) -> Vec<Color> {
	values.into_iter()
		.flatten()
		.map(|v| match v.parse::<Color>() {
			Ok(c) => c,
			Err(e) => error_exit(&format!("Invalid color for {}: {}", what, e), 2),
		})
		.collect()
}

fn write_text(path: &str, text: &str) {
	match fs::write(path, text.to_string() + "\n") {
		Ok(_) => println!("wrote {}", path),
		Err(_) => error_exit("Could not write to output file", 3),
	}
}

/// `clap`-based CLI that compresses an image and dumps its quadtree and
/// palette.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	let clap_matches = clap::App::new("quadtree_palette")
		.version("0.1.0")
		.author("vkcz")
		.about("Compresses a square image with a quadtree and extracts its color palette.")
		.arg_from_usage("-l, --lambda=[N] 'Merge leaf groups whose luminance degradation is below N (0-255)'")
		.arg_from_usage("-p, --phi=[N] 'Merge the least degrading leaf groups until at most N leaves remain'")
		.arg_from_usage("-o, --output=[BASE] 'Base path for output files; defaults to INPUT without its extension'")
		.arg_from_usage("-a, --add=[HEX]... 'Add colors (rrggbb) to the palette before writing it'")
		.arg_from_usage("-r, --remove=[HEX]... 'Remove colors (rrggbb) from the palette before writing it'")
		.arg_from_usage("-s, --search=[HEX]... 'Report whether colors (rrggbb) are in the palette'")
		.arg_from_usage("-v... 'Log verbosity; repeat for more'")
		.arg_from_usage("<INPUT> 'Path to input image; must be square with a power-of-two side'")
		.get_matches();

	setup_logging(clap_matches.occurrences_of("v"));

	let compression = match (clap_matches.value_of("lambda"), clap_matches.value_of("phi")) {
		(Some(_), Some(_)) => error_exit("Only one of -l/--lambda and -p/--phi must be present", 2),
		(Some(n), None) => match n.parse::<u32>() {
			Ok(n) => Compression::Lambda(n),
			Err(_) => error_exit("Non-numeric value for lambda", 2),
		},
		(None, Some(n)) => match n.parse::<usize>() {
			Ok(n) if n > 0 => Compression::Phi(n),
			_ => error_exit("Phi must be a positive number", 2),
		},
		(None, None) => error_exit("One of -l/--lambda and -p/--phi must be present", 2),
	};
	let additions = parse_colors(clap_matches.values_of("add"), "add");
	let removals = parse_colors(clap_matches.values_of("remove"), "remove");
	let searches = parse_colors(clap_matches.values_of("search"), "search");

	let input_path = clap_matches.value_of("INPUT").unwrap();
	let base = clap_matches.value_of("output")
		.map(str::to_string)
		.unwrap_or_else(|| input_path.rsplitn(2, '.').last().unwrap().to_string());

	let source = match image::open(input_path) {
		Ok(i) => i,
		Err(e) => {
			let (msg, code) = match e {
				ImageError::Decoding(_) | ImageError::Unsupported(_) => ("Invalid image data", 4),
				ImageError::Limits(_) => ("Computation limits exceeded", 5),
				ImageError::IoError(_) => ("File not found or could not be read", 3),
				_ => ("An error occurred", 10)
			};
			error_exit(msg, code)
		}
	}.into_rgb8();

	let mut tree = match Quadtree::from_image(&source) {
		Ok(t) => t,
		Err(e) => error_exit(&e.to_string(), 4),
	};
	tracing::info!(size = tree.size(), leaves = tree.leaf_count(), "built quadtree");

	match compression {
		Compression::Lambda(n) => tree.compress_lambda(n),
		Compression::Phi(n) => tree.compress_phi(n),
	}
	tracing::info!(leaves = tree.leaf_count(), "compressed quadtree");

	let compressed_path = format!("{}_compressed.png", base);
	let output = tree.to_image();
	match output.save(&compressed_path) {
		Ok(_) => println!("wrote {}", compressed_path),
		Err(_) => error_exit("Could not save output", 3),
	}
	write_text(&format!("{}_tree.txt", base), &tree.to_string());

	let mut palette = PaletteTree::from_quadtree(&tree);
	tracing::info!(colors = palette.len(), "built palette");
	for c in additions {
		if !palette.insert(c) {
			tracing::info!(color = %c, "color already in palette");
		}
	}
	for c in removals {
		if !palette.remove(&c) {
			tracing::warn!(color = %c, "color not in palette");
		}
	}
	for c in searches {
		println!("{}: {}", c, if palette.contains(&c) { "found" } else { "not found" });
	}
	write_text(&format!("{}_palette.txt", base), &palette.to_string());

	// `.expect()` is valid here: the output image is rendered from a tree
	// built from `source`, so both have the same dimensions.
	let mse = metrics::mean_squared_error(&source, &output).expect("rendered image size differs");
	println!("quality (MSE): {:.4}%", metrics::quality_percent(mse));
	match (fs::metadata(input_path), fs::metadata(&compressed_path)) {
		(Ok(a), Ok(b)) => println!("size ratio: {}%", metrics::size_ratio_percent(a.len(), b.len())),
		_ => error_exit("Could not read file sizes", 3),
	}
}
