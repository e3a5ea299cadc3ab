use std::ops::Mul;

/// Affine map from pixel `(col, row)` to `(x, y)`:
///
/// ```text
/// x = a * col + b * row + c
/// y = d * col + e * row + f
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
	pub a: f64,
	pub b: f64,
	pub c: f64,
	pub d: f64,
	pub e: f64,
	pub f: f64,
}

impl Affine {
	pub fn translation(x: f64, y: f64) -> Self {
		Self {
			a: 1.0,
			b: 0.0,
			c: x,
			d: 0.0,
			e: 1.0,
			f: y,
		}
	}

	pub fn scale(x: f64, y: f64) -> Self {
		Self {
			a: x,
			b: 0.0,
			c: 0.0,
			d: 0.0,
			e: y,
			f: 0.0,
		}
	}

	pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
		(
			self.a * col + self.b * row + self.c,
			self.d * col + self.e * row + self.f,
		)
	}
}

impl Mul for Affine {
	type Output = Affine;

	fn mul(self, rhs: Affine) -> Affine {
		Affine {
			a: self.a * rhs.a + self.b * rhs.d,
			b: self.a * rhs.b + self.b * rhs.e,
			c: self.a * rhs.c + self.b * rhs.f + self.c,
			d: self.d * rhs.a + self.e * rhs.d,
			e: self.d * rhs.b + self.e * rhs.e,
			f: self.d * rhs.c + self.e * rhs.f + self.f,
		}
	}
}

/// Transform whose pixel `(i, j)` is centred on `(lon0 + i * d_lon, lat0 + j * d_lat)`.
pub fn transform_from_steps(lon0: f64, d_lon: f64, lat0: f64, d_lat: f64) -> Affine {
	Affine::translation(lon0 - d_lon / 2.0, lat0 - d_lat / 2.0) * Affine::scale(d_lon, d_lat)
}
