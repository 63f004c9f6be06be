/// Single channel coverage bitmap as produced by the rasterizer, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coverage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Coverage {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Grows the shape by `radius` pixels in every direction using a disc shaped max filter.
    /// The result is `2 * radius` larger on both axes.
    pub fn dilate(&self, radius: u32) -> Coverage {
        if radius == 0 {
            return self.clone();
        }
        let r = radius as i64;
        let width = self.width + 2 * radius as usize;
        let height = self.height + 2 * radius as usize;
        let kernel: Vec<(i64, i64)> = (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|(dx, dy)| dx * dx + dy * dy <= r * r)
            .collect();

        let mut data = vec![0u8; width * height];
        for oy in 0..height {
            for ox in 0..width {
                let mut value = 0u8;
                for (dx, dy) in kernel.iter() {
                    let sx = ox as i64 - r + dx;
                    let sy = oy as i64 - r + dy;
                    if sx < 0 || sy < 0 || sx >= self.width as i64 || sy >= self.height as i64 {
                        continue;
                    }
                    value = value.max(self.get(sx as usize, sy as usize));
                    if value == u8::MAX {
                        break;
                    }
                }
                data[oy * width + ox] = value;
            }
        }

        Coverage::new(width, height, data)
    }

    /// Turns anti-aliased coverage into a hard mask.
    pub fn threshold(&mut self) {
        for value in self.data.iter_mut() {
            *value = if *value >= 128 { u8::MAX } else { 0 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dilate_single_pixel_makes_a_disc() {
        let dot = Coverage::new(1, 1, vec![255]);
        let grown = dot.dilate(1);
        assert_eq!((grown.width, grown.height), (3, 3));
        #[rustfmt::skip]
        let disc = vec![
            0, 255, 0,
            255, 255, 255,
            0, 255, 0,
        ];
        assert_eq!(grown.data, disc);
    }

    #[test]
    fn dilate_keeps_the_strongest_neighbour() {
        let row = Coverage::new(2, 1, vec![40, 200]);
        let grown = row.dilate(1);
        assert_eq!((grown.width, grown.height), (4, 3));
        assert_eq!(grown.get(1, 1), 200);
        assert_eq!(grown.get(0, 1), 40);
        assert_eq!(grown.get(3, 1), 200);
        assert_eq!(grown.get(0, 0), 0);
    }

    #[test]
    fn zero_radius_is_identity() {
        let cov = Coverage::new(2, 2, vec![1, 2, 3, 4]);
        assert_eq!(cov.dilate(0), cov);
    }

    #[test]
    fn threshold_splits_at_half() {
        let mut cov = Coverage::new(4, 1, vec![0, 127, 128, 255]);
        cov.threshold();
        assert_eq!(cov.data, vec![0, 0, 255, 255]);
    }
}
