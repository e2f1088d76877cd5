use std::fmt;

use super::vector3::Vector3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
/// Aka Block Position
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn offset(&self, offset: Vector3<i32>) -> Self {
        BlockPos(self.0 + offset)
    }

    pub fn up(&self) -> Self {
        self.offset(Vector3::new(0, 1, 0))
    }

    pub fn up_height(&self, height: i32) -> Self {
        self.offset(Vector3::new(0, height, 0))
    }

    pub fn down(&self) -> Self {
        self.offset(Vector3::new(0, -1, 0))
    }

    pub fn down_height(&self, height: i32) -> Self {
        self.offset(Vector3::new(0, -height, 0))
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod test {
    use super::BlockPos;

    #[test]
    fn vertical_neighbours() {
        let pos = BlockPos::new(10, 64, -3);
        assert_eq!(pos.down(), BlockPos::new(10, 63, -3));
        assert_eq!(pos.up(), BlockPos::new(10, 65, -3));
        assert_eq!(pos.up().down(), pos);
        assert_eq!(pos.up_height(2), pos.up().up());
        assert_eq!(pos.down_height(64), BlockPos::new(10, 0, -3));
    }

    #[test]
    fn display() {
        assert_eq!(BlockPos::new(1, -2, 3).to_string(), "1, -2, 3");
    }
}
