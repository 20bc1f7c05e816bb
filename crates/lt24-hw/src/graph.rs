//! Column graph geometry.
//!
//! A graph is `columns` vertical slices of equal width, each split into
//! bands of `window_height` rows. Band 0 is at the top of the panel.

use tracing::debug;

use crate::colour::map_magnitude_to_colour;
use crate::lcd::{DeviceInterface, Lt24, Window};
use crate::{Error, Result, LCD_HEIGHT, LCD_WIDTH};

/// Layout of a column graph on the panel.
///
/// When `graph_width` is not a multiple of `columns`, or `graph_height` of
/// `window_height`, the leftover pixels on the right and bottom are never
/// drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphGeometry {
    graph_width: u16,
    graph_height: u16,
    columns: u16,
    window_height: u16,
}

impl GraphGeometry {
    pub fn new(
        graph_width: u16,
        graph_height: u16,
        columns: u16,
        window_height: u16,
    ) -> Result<Self> {
        if graph_width > LCD_WIDTH || graph_height > LCD_HEIGHT {
            return Err(Error::invalid_size(
                0,
                0,
                graph_width.into(),
                graph_height.into(),
            ));
        }
        if columns == 0 {
            return Err(Error::InvalidShape("graph needs at least one column".into()));
        }
        if window_height == 0 {
            return Err(Error::InvalidShape("window height must be non-zero".into()));
        }
        if graph_width / columns == 0 {
            return Err(Error::InvalidShape(format!(
                "{columns} columns do not fit in {graph_width} pixels"
            )));
        }
        if graph_height / window_height == 0 {
            return Err(Error::InvalidShape(format!(
                "window height {window_height} exceeds graph height {graph_height}"
            )));
        }

        Ok(Self {
            graph_width,
            graph_height,
            columns,
            window_height,
        })
    }

    pub fn graph_width(&self) -> u16 {
        self.graph_width
    }

    pub fn graph_height(&self) -> u16 {
        self.graph_height
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn window_height(&self) -> u16 {
        self.window_height
    }

    /// Pixel width of one column.
    pub fn column_width(&self) -> u16 {
        self.graph_width / self.columns
    }

    /// Number of bands in each column.
    pub fn bands(&self) -> u16 {
        self.graph_height / self.window_height
    }

    /// Columns of pixels left undrawn on the right.
    pub fn unused_width(&self) -> u16 {
        self.graph_width % self.columns
    }

    /// Rows of pixels left undrawn at the bottom.
    pub fn unused_height(&self) -> u16 {
        self.graph_height % self.window_height
    }

    /// Left edge of a column.
    pub fn column_x(&self, column: u16) -> u16 {
        column * self.column_width()
    }

    /// Top edge of a band.
    pub fn band_y(&self, band: u16) -> u16 {
        band * self.window_height
    }

    /// Window covering one band of one column.
    pub fn band_window(&self, column: u16, band: u16) -> Result<Window> {
        if column >= self.columns || band >= self.bands() {
            return Err(Error::invalid_size(
                u32::from(column) * u32::from(self.column_width()),
                u32::from(band) * u32::from(self.window_height),
                self.column_width().into(),
                self.window_height.into(),
            ));
        }
        Window::new(
            self.column_x(column),
            self.band_y(band),
            self.column_width(),
            self.window_height,
        )
    }
}

impl<I: DeviceInterface> Lt24<I> {
    /// Sets the column graph layout used by the column drawing calls.
    ///
    /// Only stores the geometry; nothing is sent to the panel, and the
    /// driver does not need to be initialised yet.
    pub fn init_geometries(
        &mut self,
        graph_width: u16,
        graph_height: u16,
        columns: u16,
        window_height: u16,
    ) -> Result<()> {
        let geometry = GraphGeometry::new(graph_width, graph_height, columns, window_height)?;
        if geometry.unused_width() > 0 || geometry.unused_height() > 0 {
            debug!(
                "Graph leaves {}px right and {}px bottom undrawn",
                geometry.unused_width(),
                geometry.unused_height()
            );
        }
        debug!(
            "Graph geometry: {} columns of {}px, {} bands of {}px",
            geometry.columns(),
            geometry.column_width(),
            geometry.bands(),
            geometry.window_height()
        );
        self.geometry = Some(geometry);
        Ok(())
    }

    /// Returns the current graph geometry, if any.
    pub fn geometry(&self) -> Option<&GraphGeometry> {
        self.geometry.as_ref()
    }

    fn require_geometry(&self) -> Result<GraphGeometry> {
        self.geometry.ok_or(Error::GeometryNotSet)
    }

    /// Fills one band-sized window (`column_width x window_height`) with its
    /// top-left corner at `(x, y)`.
    pub fn draw_window(&mut self, colour: u16, x: u16, y: u16) -> Result<()> {
        self.ensure_initialised()?;
        let geometry = self.require_geometry()?;
        let window = Window::new(x, y, geometry.column_width(), geometry.window_height())?;
        self.open_window(window).fill_remaining(colour);
        Ok(())
    }

    /// Draws one column of bands, top to bottom, one colour per band.
    ///
    /// The column index and band count are checked before anything is drawn.
    /// Bands are then drawn in order and the first failure stops the column;
    /// bands already drawn stay on the panel.
    pub fn draw_column(&mut self, colours: &[u16], column: u16) -> Result<()> {
        self.ensure_initialised()?;
        let geometry = self.require_geometry()?;

        if column >= geometry.columns() {
            return Err(Error::invalid_size(
                u32::from(column) * u32::from(geometry.column_width()),
                0,
                geometry.column_width().into(),
                geometry.graph_height().into(),
            ));
        }
        if colours.len() > geometry.bands() as usize {
            return Err(Error::InvalidShape(format!(
                "{} colours for a column of {} bands",
                colours.len(),
                geometry.bands()
            )));
        }

        let x = geometry.column_x(column);
        for (band, &colour) in colours.iter().enumerate() {
            self.draw_window(colour, x, geometry.band_y(band as u16))?;
        }
        Ok(())
    }

    /// Draws one column from magnitudes, each mapped onto the heat scale.
    pub fn draw_magnitude_column(&mut self, magnitudes: &[u16], column: u16) -> Result<()> {
        let colours: Vec<u16> = magnitudes
            .iter()
            .map(|&mag| map_magnitude_to_colour(mag))
            .collect();
        self.draw_column(&colours, column)
    }

    /// Draws a full frame, one entry per column from the left.
    pub fn draw_graph<C: AsRef<[u16]>>(&mut self, columns: &[C]) -> Result<()> {
        self.ensure_initialised()?;
        let geometry = self.require_geometry()?;
        if columns.len() > geometry.columns() as usize {
            return Err(Error::InvalidShape(format!(
                "{} columns for a graph of {}",
                columns.len(),
                geometry.columns()
            )));
        }

        for (column, colours) in columns.iter().enumerate() {
            self.draw_column(colours.as_ref(), column as u16)?;
        }
        debug!("Graph frame drawn ({} columns)", columns.len());
        Ok(())
    }
}
