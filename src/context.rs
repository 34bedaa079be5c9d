use crate::{
    block::{
        decode_chars, decode_common, decode_info, decode_kerning, decode_pages, Block, BlockKind,
        CommonMetrics, FontInfo,
    },
    compile::{CompiledFont, RangeCompiler},
    error::{BmFontError, BmFontResult},
};

/// State accumulated while reading a single container
#[derive(Debug, Default)]
pub struct CompilationContext {
    info: Option<FontInfo>,
    common: Option<CommonMetrics>,
    pages: Vec<String>,
    compiler: RangeCompiler,
}

/// A fully read and compiled container
#[derive(Debug, Clone)]
pub struct CompiledContainer {
    pub info: FontInfo,
    pub common: Option<CommonMetrics>,
    pub pages: Vec<String>,
    pub font: CompiledFont,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_block(&mut self, block: &Block) -> BmFontResult<()> {
        match block.kind {
            BlockKind::Info => self.handle_info(&block.payload),
            BlockKind::Common => self.handle_common(&block.payload),
            BlockKind::Pages => self.handle_pages(&block.payload),
            BlockKind::Chars => self.handle_chars(&block.payload),
            BlockKind::Kerning => {
                decode_kerning(&block.payload);
                Ok(())
            }
        }
    }

    fn handle_info(&mut self, payload: &[u8]) -> BmFontResult<()> {
        if self.info.is_some() {
            anyhow::bail!(BmFontError::DuplicateBlock {
                kind: BlockKind::Info
            });
        }

        let info = decode_info(payload)?;
        log::info!("detected `{}` (size {})", info.font_name, info.font_size);

        self.info = Some(info);

        Ok(())
    }

    fn handle_common(&mut self, payload: &[u8]) -> BmFontResult<()> {
        if self.common.is_some() {
            anyhow::bail!(BmFontError::DuplicateBlock {
                kind: BlockKind::Common
            });
        }

        let common = decode_common(payload)?;
        log::info!("line height: {}", common.line_height);

        self.pages.reserve(usize::from(common.pages));
        self.common = Some(common);

        Ok(())
    }

    fn handle_pages(&mut self, payload: &[u8]) -> BmFontResult<()> {
        let declared = match &self.common {
            Some(common) => common.pages,
            None => anyhow::bail!(BmFontError::MissingBlock {
                kind: BlockKind::Common
            }),
        };

        let pages = decode_pages(payload)?;

        if self.pages.len() + pages.len() > usize::from(declared) {
            anyhow::bail!(BmFontError::TooManyPages {
                declared,
                found: self.pages.len() + pages.len(),
            });
        }

        for page in pages {
            log::info!("detected page: {}", page);
            self.pages.push(page);
        }

        Ok(())
    }

    fn handle_chars(&mut self, payload: &[u8]) -> BmFontResult<()> {
        let glyphs = decode_chars(payload)?;
        log::info!("detected {} chars", glyphs.len());

        self.compiler.extend(&glyphs)
    }

    pub fn finish(self) -> BmFontResult<CompiledContainer> {
        let info = match self.info {
            Some(info) => info,
            None => anyhow::bail!(BmFontError::MissingBlock {
                kind: BlockKind::Info
            }),
        };

        if let Some(common) = &self.common {
            if self.pages.len() < usize::from(common.pages) {
                log::warn!(
                    "common block declares {} pages but only {} were named",
                    common.pages,
                    self.pages.len()
                );
            }
        }

        Ok(CompiledContainer {
            info,
            common: self.common,
            pages: self.pages,
            font: self.compiler.finish(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util;

    fn block(kind: BlockKind, payload: Vec<u8>) -> Block {
        Block { kind, payload }
    }

    #[test]
    fn missing_info_block() {
        let err = CompilationContext::new().finish().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BmFontError>(),
            Some(BmFontError::MissingBlock {
                kind: BlockKind::Info
            })
        ));
    }

    #[test]
    fn duplicate_info_block() {
        let mut ctx = CompilationContext::new();
        let info = block(BlockKind::Info, test_util::info_bytes("Mono", 12));

        ctx.handle_block(&info).unwrap();
        let err = ctx.handle_block(&info).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BmFontError>(),
            Some(BmFontError::DuplicateBlock {
                kind: BlockKind::Info
            })
        ));
    }

    #[test]
    fn pages_before_common() {
        let mut ctx = CompilationContext::new();

        let err = ctx
            .handle_block(&block(BlockKind::Pages, b"a.png\0".to_vec()))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BmFontError>(),
            Some(BmFontError::MissingBlock {
                kind: BlockKind::Common
            })
        ));
    }

    #[test]
    fn page_count_is_bounded_by_common() {
        let mut ctx = CompilationContext::new();
        ctx.handle_block(&block(BlockKind::Common, test_util::common_bytes(1)))
            .unwrap();

        let err = ctx
            .handle_block(&block(BlockKind::Pages, b"a.png\0b.png\0".to_vec()))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BmFontError>(),
            Some(BmFontError::TooManyPages {
                declared: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn glyphs_across_chars_blocks_stay_ordered() {
        let mut ctx = CompilationContext::new();
        ctx.handle_block(&block(BlockKind::Info, test_util::info_bytes("Mono", 12)))
            .unwrap();
        ctx.handle_block(&block(BlockKind::Chars, test_util::chars_bytes(&[65, 66])))
            .unwrap();

        assert!(ctx
            .handle_block(&block(BlockKind::Chars, test_util::chars_bytes(&[60])))
            .is_err());
    }

    #[test]
    fn full_container() {
        let mut ctx = CompilationContext::new();
        ctx.handle_block(&block(BlockKind::Info, test_util::info_bytes("Mono", 12)))
            .unwrap();
        ctx.handle_block(&block(BlockKind::Common, test_util::common_bytes(2)))
            .unwrap();
        ctx.handle_block(&block(BlockKind::Pages, b"m_0.png\0m_1.png\0".to_vec()))
            .unwrap();
        ctx.handle_block(&block(BlockKind::Chars, test_util::chars_bytes(&[32, 33, 65])))
            .unwrap();
        ctx.handle_block(&block(BlockKind::Kerning, vec![0; 20]))
            .unwrap();

        let container = ctx.finish().unwrap();

        assert_eq!(container.info.font_name, "Mono");
        assert_eq!(container.common.unwrap().pages, 2);
        assert_eq!(container.pages, vec!["m_0.png", "m_1.png"]);
        assert_eq!(container.font.slices().len(), 2);
    }
}
