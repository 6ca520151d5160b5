use calc_rs::error::ExprError;
use calc_rs::plot::{DEFAULT_PLOT_POINTS, PlotPoint, PlotRange, sample};
use calc_rs::assert_approx_eq;

#[test]
fn test_sample_default_range() {
    let points = sample("x^2 - 4", PlotRange::new(-10.0, 10.0), DEFAULT_PLOT_POINTS).unwrap();
    assert_eq!(points.len(), DEFAULT_PLOT_POINTS);
    assert_eq!(points[0], PlotPoint { x: -10.0, y: 96.0 });
    assert_eq!(points[500].x, 0.0);
    assert_approx_eq!(points[500].y, -4.0);
    assert_eq!(points[999].x, 9.98);
}

#[test]
fn test_gaps_where_evaluation_fails() {
    // ln is undefined for x <= 0
    let points = sample("ln(x)", PlotRange::new(-5.0, 5.0), 10).unwrap();
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    assert_eq!(xs, [1.0, 2.0, 3.0, 4.0]);

    // tan has poles but never fails, so every point is kept
    let points = sample("tan(x)", PlotRange::new(-3.0, 3.0), 60).unwrap();
    assert_eq!(points.len(), 60);
}

#[test]
fn test_overflow_is_dropped() {
    let points = sample("10^(x*100)", PlotRange::new(0.0, 4.0), 4).unwrap();
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    assert_eq!(xs, [0.0, 1.0, 2.0, 3.0]);

    let points = sample("10^(x*200)", PlotRange::new(0.0, 4.0), 4).unwrap();
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    assert_eq!(xs, [0.0, 1.0]);
}

#[test]
fn test_validation_happens_before_sampling() {
    assert_eq!(
        sample("sin(x", PlotRange::new(0.0, 1.0), 10),
        Err(ExprError::UnbalancedBrackets { position: 5 })
    );
    assert_eq!(
        sample("x", PlotRange::new(0.0, 0.0), 10),
        Err(ExprError::InvalidPlotRange)
    );
}

#[test]
fn test_points_serialize_to_json() {
    let points = sample("2*x", PlotRange::new(0.0, 2.0), 2).unwrap();
    let json = serde_json::to_string(&points).unwrap();
    assert_eq!(json, r#"[{"x":0.0,"y":0.0},{"x":1.0,"y":2.0}]"#);

    let range: PlotRange = serde_json::from_str(r#"{"x_min":-1.0,"x_max":1.0}"#).unwrap();
    assert_eq!(range, PlotRange::new(-1.0, 1.0));
}
