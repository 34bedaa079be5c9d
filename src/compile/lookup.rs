use super::{CompiledFont, GlyphRecord};

impl CompiledFont {
    /// Looks up the glyph for a code point.
    ///
    /// This is the same search the emitted `bmfont_char_info` performs: the
    /// leftmost slice whose end is not below `id` is the only candidate, and
    /// it only holds `id` if `id` is not below its start.
    pub fn find(&self, id: u32) -> Option<&GlyphRecord> {
        let idx = self.slices.partition_point(|slice| id > slice.end);
        let slice = self.slices.get(idx)?;

        if id < slice.start {
            return None;
        }

        let record = slice.records.get((id - slice.start) as usize)?;

        if record.is_absent() {
            return None;
        }

        Some(record)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        compile::{compile, GlyphRecord},
        test_util::glyph,
    };

    #[test]
    fn every_inserted_glyph_is_found() {
        let ids = [32, 33, 36, 48, 57, 65, 66, 70, 200, 0x2026, 0x1f600];
        let glyphs = ids.iter().map(|&id| glyph(id)).collect::<Vec<_>>();
        let font = compile(&glyphs).unwrap();

        for g in &glyphs {
            assert_eq!(font.find(g.id), Some(&GlyphRecord::from(g)), "{}", g.id);
        }
    }

    #[test]
    fn gaps_inside_a_slice_are_missing() {
        let font = compile(&[glyph(65), glyph(66), glyph(70)]).unwrap();

        for id in 67..70 {
            assert_eq!(font.find(id), None);
        }
    }

    #[test]
    fn ids_outside_every_slice_are_missing() {
        let font = compile(&[glyph(65), glyph(100), glyph(101)]).unwrap();

        for id in [0, 64, 66, 80, 99, 102, u32::MAX] {
            assert_eq!(font.find(id), None, "{}", id);
        }
    }

    #[test]
    fn empty_font() {
        let font = compile(&[]).unwrap();

        assert_eq!(font.find(0), None);
        assert_eq!(font.find(65), None);
    }

    #[test]
    fn zero_width_zero_advance_glyph_reads_as_missing() {
        let mut combining = glyph(0x300);
        combining.width = 0;
        combining.xadvance = 0;

        let font = compile(&[glyph(0x2ff), combining]).unwrap();

        assert!(font.find(0x2ff).is_some());
        assert_eq!(font.find(0x300), None);
    }

    #[test]
    fn zero_width_glyph_with_advance_is_found() {
        let mut space = glyph(32);
        space.width = 0;
        space.height = 0;

        let font = compile(&[space]).unwrap();

        assert_eq!(font.find(32), Some(&GlyphRecord::from(&space)));
    }
}
