//! Mapping between `rootwalk_domain::RecordType` and `hickory_proto::rr::RecordType`.
//!
//! Both sides agree on the IANA type code, so the conversion goes through it
//! instead of listing every variant twice.

use rootwalk_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    /// Convert hickory RecordType → domain RecordType.
    ///
    /// Returns `None` for types the resolver has no name for.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
