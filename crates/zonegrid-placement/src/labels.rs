//! Node labels. Zone ids are embedded verbatim so labels stay unique
//! across zones of one diagram.

pub const GATEWAY: &str = "Internet Gateway";
pub const DATABASE_WRITER: &str = "RDS-Writer";
pub const PUBLIC_SUBNET: &str = "Public Subnet";
pub const PRIVATE_SUBNET: &str = "Private Subnet";

/// `index` is 0-based; labels are 1-based.
pub fn compute(index: usize) -> String {
    format!("EC2-{}", index + 1)
}

/// `index` is 0-based; labels are 1-based.
pub fn storage(index: usize) -> String {
    format!("S3-{}", index + 1)
}

/// Readers keep the 0-based database index.
pub fn database_reader(index: usize) -> String {
    format!("RDS-Reader-{index}")
}

pub fn load_balancer(zone: &str) -> String {
    format!("ALB-{zone}")
}

pub fn nat_gateway(zone: &str) -> String {
    format!("NAT-{zone}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(compute(0), "EC2-1");
        assert_eq!(storage(2), "S3-3");
        assert_eq!(database_reader(1), "RDS-Reader-1");
        assert_eq!(load_balancer("ap-northeast-2a"), "ALB-ap-northeast-2a");
        assert_eq!(nat_gateway("Zone B"), "NAT-Zone B");
    }
}
