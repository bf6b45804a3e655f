use std::path::{Path, PathBuf};

use crate::error::{InputError, Result};

/// Everything one collage run needs from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollageRequest {
    output_path: PathBuf,
    width: u32,
    height: u32,
    input_paths: Vec<PathBuf>,
}

impl CollageRequest {
    /// Create a request, rejecting a zero-sized canvas
    pub fn new<P, I, Q>(output_path: P, width: u32, height: u32, input_paths: I) -> Result<Self>
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = Q>,
        Q: Into<PathBuf>,
    {
        if width == 0 || height == 0 {
            return Err(InputError::InvalidDimensions { width, height }.into());
        }

        Ok(Self {
            output_path: output_path.into(),
            width,
            height,
            input_paths: input_paths.into_iter().map(Into::into).collect(),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Input images in the order they are drawn
    pub fn input_paths(&self) -> &[PathBuf] {
        &self.input_paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_keeps_input_order() {
        let request = CollageRequest::new("out.png", 200, 100, ["b.png", "a.png", "c.jpg"]).unwrap();

        assert_eq!(request.output_path(), Path::new("out.png"));
        assert_eq!((request.width(), request.height()), (200, 100));
        assert_eq!(
            request.input_paths(),
            &[PathBuf::from("b.png"), PathBuf::from("a.png"), PathBuf::from("c.jpg")]
        );
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(CollageRequest::new("out.png", 0, 100, Vec::<PathBuf>::new()).is_err());
        assert!(CollageRequest::new("out.png", 100, 0, Vec::<PathBuf>::new()).is_err());
    }
}
