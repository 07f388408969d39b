//! Tests for error formatting and context propagation

#[cfg(test)]
mod tests {
    use imagetiles::TilingError;
    use imagetiles::io::error::{
        ErrorContext, Result, WithContext, computation_error, invalid_parameter, render_failure,
    };
    use std::error::Error;
    use std::path::PathBuf;

    // Tests user-facing messages of the domain errors
    // Verified by changing the message templates
    #[test]
    fn test_display_messages() {
        assert_eq!(
            TilingError::InvalidGeometry {
                width: 0,
                height: 5,
                tiles: 3
            }
            .to_string(),
            "Cannot tile a 0x5 image into 3 tiles: all values must be positive"
        );
        assert_eq!(TilingError::EmptyPalette.to_string(), "Color map yields no colors");
        assert_eq!(
            TilingError::PopulationTooSmall { size: 2 }.to_string(),
            "Population size 2 is too small: selection needs at least 3 individuals"
        );
        assert_eq!(
            invalid_parameter("tiles", &0, &"at least one tile is required").to_string(),
            "Invalid parameter 'tiles' = '0': at least one tile is required"
        );
        assert_eq!(
            computation_error("fitness evaluation", &"cost is NaN").to_string(),
            "Computation error in fitness evaluation: cost is NaN"
        );
    }

    // Tests iteration context is attached to render failures
    // Verified by dropping the iteration in with_context
    #[test]
    fn test_with_iteration_render_failure() {
        let result: Result<()> = Err(render_failure("fill rectangle", &"surface closed"));

        let error = result.with_iteration(7).expect_err("still an error");

        assert!(matches!(
            error,
            TilingError::RenderFailure {
                operation: "fill rectangle",
                iteration: Some(7),
                ..
            }
        ));
        assert_eq!(
            error.to_string(),
            "Render failure in fill rectangle at iteration 7: surface closed"
        );
    }

    // Tests other errors pass through context untouched
    // Verified by converting every error into a render failure
    #[test]
    fn test_with_context_other_errors() {
        let result: Result<()> = Err(TilingError::EmptyPalette);

        let error = result
            .with_context(ErrorContext {
                iteration: Some(1),
                operation: Some("extract palette"),
            })
            .expect_err("still an error");

        assert!(matches!(error, TilingError::EmptyPalette));
    }

    // Tests operation context overrides the original operation name
    // Verified by ignoring the operation field
    #[test]
    fn test_with_context_operation() {
        let result: Result<()> = Err(render_failure("read pixel", &"outside"));

        let error = result
            .with_context(ErrorContext {
                iteration: None,
                operation: Some("match tiles"),
            })
            .expect_err("still an error");

        assert_eq!(error.to_string(), "Render failure in match tiles: outside");
    }

    // Tests successful results are left alone
    // Verified by mapping Ok values through the error path
    #[test]
    fn test_with_iteration_ok() {
        let result: Result<u32> = Ok(3);

        assert_eq!(result.with_iteration(1).expect("still ok"), 3);
    }

    // Tests I/O errors convert and keep their source
    // Verified by discarding the source error
    #[test]
    fn test_io_error_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = TilingError::FileSystem {
            path: PathBuf::from("out"),
            operation: "create directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("create directory"));
        assert!(TilingError::EmptyPalette.source().is_none());

        let converted: TilingError = std::io::Error::other("boom").into();
        assert!(matches!(converted, TilingError::FileSystem { .. }));
    }
}
