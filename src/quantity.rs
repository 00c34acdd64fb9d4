#[macro_use]
mod macros;

pub mod cost;
pub mod power;
pub mod soc;

#[cfg(test)]
mod tests {
    use super::{cost::Cost, power::Kilowatts, soc::StateOfCharge};

    #[test]
    fn test_min() {
        assert_eq!(Kilowatts(1.0).min(Kilowatts(2.0)), Kilowatts(1.0));
        assert_eq!(Kilowatts(2.0).min(Kilowatts(1.0)), Kilowatts(1.0));
    }

    #[test]
    fn test_max() {
        assert_eq!(Cost(1.0).max(Cost(2.0)), Cost(2.0));
        assert_eq!(Cost(2.0).max(Cost(1.0)), Cost(2.0));
    }

    #[test]
    fn test_clamp() {
        let (min, max) = (StateOfCharge(0.2), StateOfCharge(0.8));
        assert_eq!(StateOfCharge(0.1).clamp(min, max), min);
        assert_eq!(StateOfCharge(0.9).clamp(min, max), max);
        assert_eq!(StateOfCharge(0.5).clamp(min, max), StateOfCharge(0.5));
    }

    #[test]
    fn test_abs() {
        assert_eq!(Kilowatts(-5.0).abs(), Kilowatts(5.0));
        assert_eq!((-Kilowatts(5.0)).abs(), Kilowatts(5.0));
    }

    #[test]
    fn test_sum() {
        let total: Cost = [Cost(1.0), Cost(2.5), Cost(0.5)].into_iter().sum();
        assert_eq!(total, Cost(4.0));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("-12.5".parse::<Kilowatts>().unwrap(), Kilowatts(-12.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Kilowatts(12.345).to_string(), "12.35 kW");
        assert_eq!(StateOfCharge(0.5).to_string(), "50.0 %");
    }
}
