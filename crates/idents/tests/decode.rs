//! End-to-end decoding: build volume identifiers the way the geometry
//! description emits them, then decode each subsystem's id from them.

use idents::{acdconv, AcdId, CalXtalId, IdentsError, TkrId, TowerId, VolumeIdentifier};

fn vid(fields: &[u32]) -> VolumeIdentifier {
    VolumeIdentifier::from_fields(fields).unwrap()
}

#[test]
fn calorimeter_decode_matches_tower_grid() {
    let vid = vid(&[0, 1, 2, 0, 5, 0, 10]);
    assert!(vid.is_cal());

    let xtal = CalXtalId::from_volume_id(&vid, 4).unwrap();
    assert_eq!(xtal.tower(), 6);

    let tower = TowerId::from_xy(2, 1).unwrap();
    assert_eq!(tower.id(), xtal.tower());
}

#[test]
fn tracker_decode_depth_follows_the_source() {
    let full = vid(&[0, 0, 1, 1, 3, 0, 1, 2, 1]);
    assert!(full.is_tkr());
    let id = TkrId::from_volume_id(&full).unwrap();
    assert_eq!(id.wafer(), Ok(1));

    let tray_only = vid(&[0, 0, 1, 1, 3]);
    let id = TkrId::from_volume_id(&tray_only).unwrap();
    assert_eq!(id.tray(), Ok(3));
    assert_eq!(
        id.ladder(),
        Err(IdentsError::FieldNotPresent { field: "ladder" })
    );
}

#[test]
fn decoders_reject_each_others_volumes() {
    let cal = vid(&[0, 1, 2, 0, 5, 0, 10]);
    let tkr = vid(&[0, 1, 2, 1, 5, 0, 1]);
    let acd = vid(&[1, 0, 40, 2, 3]);

    assert!(CalXtalId::from_volume_id(&tkr, 4).is_err());
    assert!(CalXtalId::from_volume_id(&acd, 4).is_err());
    assert!(TkrId::from_volume_id(&cal).is_err());
    assert!(TkrId::from_volume_id(&acd).is_err());
    assert!(AcdId::from_volume_id(&cal).is_err());
    assert!(AcdId::from_volume_id(&tkr).is_err());
}

#[test]
fn acd_tile_number_matches_conversion_tables() {
    // The decimal face/row/column form of a decoded tile is the tile number
    // the electronics tables speak; bridging the two is the caller's job.
    let tile = AcdId::from_volume_id(&vid(&[1, 2, 40, 2, 4])).unwrap();
    assert_eq!(tile.id(), 224);
    assert!(acdconv::gem_index_from_tile(224).is_some());

    let ribbon = AcdId::from_volume_id(&vid(&[1, 0, 41, 1, 2])).unwrap();
    assert_eq!(ribbon.id(), 502);
    let garc_gafe = acdconv::garc_gafe(502, 0).unwrap();
    assert_eq!(garc_gafe, acdconv::GarcGafe::new(0, 2));
}
