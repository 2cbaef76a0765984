use crate::errors::ReliefError;

/// Represents a row-major 2D grid of cells: heights, surface normals or
/// shading values. `x` is the column index, `y` the row index.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    pub width: usize,
    pub height: usize,
    data: Box<[T]>,
}

impl<T: Copy + Default> Raster<T> {
    /// Creates a new raster with the given width and height, with every cell
    /// set to the default value of `T`.
    pub fn new(width: usize, height: usize) -> Raster<T> {
        Raster::filled(width, height, T::default())
    }
}

impl<T: Copy> Raster<T> {
    /// Creates a new raster with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Raster<T> {
        Raster {
            width,
            height,
            data: vec![value; width * height].into_boxed_slice(),
        }
    }

    /// Wraps row-major cell data into a raster.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not hold exactly `width * height`
    /// cells.
    pub fn from_vec(
        width: usize,
        height: usize,
        data: Vec<T>,
    ) -> Result<Raster<T>, ReliefError> {
        if data.len() != width * height {
            return Err(ReliefError::new(&format!(
                "Raster of {}x{} needs {} cells, got {}",
                width,
                height,
                width * height,
                data.len()
            )));
        }

        Ok(Raster {
            width,
            height,
            data: data.into_boxed_slice(),
        })
    }

    /// Builds a raster from a list of rows, the first row being `y = 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows are not all of the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Raster<T>, ReliefError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());

        let mut data = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ReliefError::new(&format!(
                    "Row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            data.extend(row);
        }

        Raster::from_vec(width, height, data)
    }

    /// Returns `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Gets the value of the cell at the given coordinates.
    pub fn get(&self, x: usize, y: usize) -> T {
        if x >= self.width || y >= self.height {
            panic!("Cell coordinates out of bounds");
        }

        self.data[y * self.width + x]
    }

    /// Sets the cell at the given coordinates to the given value.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if x >= self.width || y >= self.height {
            panic!("Cell coordinates out of bounds");
        }

        self.data[y * self.width + x] = value;
    }

    /// Produces a raster of the same shape by applying `f` to every cell.
    pub fn map<U, F>(&self, f: F) -> Raster<U>
    where
        F: Fn(T) -> U,
    {
        Raster {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&value| f(value)).collect(),
        }
    }
}
