//! Binary loader for template poses.
//!
//! The loader is IO-free: it operates on an in-memory byte slice. Layout, all little-endian:
//!
//! - `u32` bone count, then per bone: name, position (3 × `f32`), rotation (x, y, z, w),
//!   scale (3 × `f32`)
//! - `u32` mapping count, then per mapping: bone name, human name, `u8` use-default-limits flag,
//!   limit min, max and center (3 × `f32` each), `f32` axis length
//! - tuning: arm stretch, feet spacing, `u8` translation DoF, leg stretch, lower arm twist,
//!   lower leg twist, upper arm twist, upper leg twist
//!
//! Strings are UTF-8 prefixed with their byte length as a 7-bit encoded integer.

use crate::pose_asset::sanitize_pose;
use crate::{BoneRecord, Error, HumanLimit, HumanMapping, RigTuning, TemplatePose};
use byteorder::{ByteOrder, LittleEndian};
use glam::{Quat, Vec3};

// Upper bound on preallocation; counts are untrusted input.
const MAX_PREALLOCATED_ENTRIES: usize = 1024;

#[derive(Clone, Debug)]
struct BinaryInput<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> BinaryInput<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < len {
            return Err(Error::BinaryParse {
                message: format!("unexpected EOF at offset {}", self.cursor),
            });
        }
        let slice = &self.bytes[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    fn read_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_u8()? != 0)
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    fn read_vec3(&mut self) -> Result<Vec3, Error> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    fn read_quat(&mut self) -> Result<Quat, Error> {
        Ok(Quat::from_xyzw(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    fn read_7bit_len(&mut self) -> Result<usize, Error> {
        let mut value = 0u32;
        for shift in (0..35).step_by(7) {
            let b = self.read_u8()?;
            value |= u32::from(b & 0x7F) << shift;
            if b & 0x80 == 0 {
                return Ok(value as usize);
            }
        }
        Err(Error::BinaryParse {
            message: format!("malformed string length at offset {}", self.cursor),
        })
    }

    fn read_string(&mut self) -> Result<String, Error> {
        let len = self.read_7bit_len()?;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|e| Error::BinaryParse {
            message: format!("invalid UTF-8 string: {e}"),
        })
    }
}

impl TemplatePose {
    pub fn from_binary(bytes: &[u8]) -> Result<Self, Error> {
        let mut input = BinaryInput::new(bytes);

        let bone_count = input.read_u32()? as usize;
        let mut bones = Vec::with_capacity(bone_count.min(MAX_PREALLOCATED_ENTRIES));
        for _ in 0..bone_count {
            let name = input.read_string()?;
            let position = input.read_vec3()?;
            let rotation = input.read_quat()?;
            let scale = input.read_vec3()?;
            bones.push(BoneRecord {
                name,
                position,
                rotation,
                scale,
            });
        }

        let mapping_count = input.read_u32()? as usize;
        let mut human = Vec::with_capacity(mapping_count.min(MAX_PREALLOCATED_ENTRIES));
        for _ in 0..mapping_count {
            let bone_name = input.read_string()?;
            let human_name = input.read_string()?;
            let limit = HumanLimit {
                use_default_values: input.read_bool()?,
                min: input.read_vec3()?,
                max: input.read_vec3()?,
                center: input.read_vec3()?,
                axis_length: input.read_f32()?,
            };
            human.push(HumanMapping {
                human_name,
                bone_name,
                limit,
            });
        }

        let arm_stretch = input.read_f32()?;
        let feet_spacing = input.read_f32()?;
        let has_translation_dof = input.read_bool()?;
        let leg_stretch = input.read_f32()?;
        let lower_arm_twist = input.read_f32()?;
        let lower_leg_twist = input.read_f32()?;
        let upper_arm_twist = input.read_f32()?;
        let upper_leg_twist = input.read_f32()?;

        if input.remaining() != 0 {
            return Err(Error::BinaryParse {
                message: format!("{} trailing bytes", input.remaining()),
            });
        }

        sanitize_pose(TemplatePose {
            bones,
            human,
            tuning: RigTuning {
                arm_stretch,
                leg_stretch,
                upper_arm_twist,
                lower_arm_twist,
                upper_leg_twist,
                lower_leg_twist,
                feet_spacing,
                has_translation_dof,
            },
        })
    }
}
