use rand::{seq::SliceRandom, Rng};

pub const FILLER: [char; 4] = ['X', 'x', '/', '\\'];
pub const STAR: char = '*';

/// A grid cell as (row, col)
pub type Cell = (usize, usize);

/// One round's grid of glyphs, possibly hiding a star
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    rows: Vec<Vec<char>>,
    star: Option<Cell>,
}

impl Pattern {
    /// Fill a `height` x `width` grid with filler glyphs and, with probability
    /// `star_probability`, replace one uniformly chosen cell with the star.
    pub fn generate<R: Rng>(
        width: usize,
        height: usize,
        star_probability: f64,
        rng: &mut R,
    ) -> Self {
        let mut rows: Vec<Vec<char>> = (0..height)
            .map(|_| {
                (0..width)
                    .map(|_| *FILLER.choose(&mut *rng).unwrap_or(&FILLER[0]))
                    .collect()
            })
            .collect();

        let star_present = rng.gen_bool(star_probability.clamp(0.0, 1.0));
        let star = if star_present && width > 0 && height > 0 {
            let cell = (rng.gen_range(0..height), rng.gen_range(0..width));
            rows[cell.0][cell.1] = STAR;
            Some(cell)
        } else {
            None
        };

        Self { rows, star }
    }

    pub fn star(&self) -> Option<Cell> {
        self.star
    }

    pub fn has_star(&self) -> bool {
        self.star.is_some()
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| row.iter().collect())
    }
}
