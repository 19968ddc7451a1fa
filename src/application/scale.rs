// Scale mapper - domain values to pixel coordinates

/// Map `datum` from `[domain_min, domain_max]` onto a pixel span starting at
/// `origin`. A negative `extent` maps upwards, as on a value axis.
pub fn scale(datum: f64, domain_min: f64, domain_max: f64, origin: f64, extent: f64) -> f64 {
    origin + (datum - domain_min) * (extent / (domain_max - domain_min))
}

/// A fixed domain-to-pixel mapping for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain_min: f64,
    pub domain_max: f64,
    pub origin: f64,
    pub extent: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, origin: f64, extent: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            origin,
            extent,
        }
    }

    pub fn map(&self, datum: f64) -> f64 {
        scale(datum, self.domain_min, self.domain_max, self.origin, self.extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(scale(0.0, 0.0, 10.0, 50.0, 400.0), 50.0);
        assert_eq!(scale(10.0, 0.0, 10.0, 50.0, 400.0), 450.0);
        assert_eq!(scale(2.5, 0.0, 10.0, 50.0, 400.0), 150.0);
    }

    #[test]
    fn test_value_axis_maps_upwards() {
        let axis = LinearScale::new(-1.0, 1.0, 290.0, -270.0);
        assert_eq!(axis.map(-1.0), 290.0);
        assert_eq!(axis.map(1.0), 20.0);
        assert_eq!(axis.map(0.0), 155.0);
    }
}
