use std::collections::HashMap;
use std::fs;
use std::path::Path;

use delve_geom::Rect;

use crate::atlas::{TextureAtlas, TileRef};
use crate::config::{VoxelDef, VoxelsConfig};
use crate::error::LibraryError;
use crate::geometry::{BoxPrimitive, BoxTextureCoords};
use crate::types::{EMPTY_TYPE, TransitionMode, VoxelType, VoxelTypeId};

pub const BEDROCK_NAME: &str = "bedrock";
pub const EMPTY_NAME: &str = "empty";

/// Voxel types and their prebuilt box geometry, indexed by [`VoxelTypeId`].
#[derive(Clone, Debug)]
pub struct VoxelLibrary {
    pub atlas: TextureAtlas,
    pub types: Vec<VoxelType>,
    primitives: Vec<Option<BoxPrimitive>>,
    pub by_name: HashMap<String, VoxelTypeId>,
    bedrock: VoxelTypeId,
}

impl VoxelLibrary {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, LibraryError> {
        let cfg: VoxelsConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: VoxelsConfig) -> Result<Self, LibraryError> {
        // Slot 0 is the implicit empty type.
        if cfg.voxels.len() > VoxelTypeId::MAX as usize {
            return Err(LibraryError::TooManyTypes(cfg.voxels.len()));
        }
        let atlas = TextureAtlas::from_config(&cfg.atlas);
        let mut lib = VoxelLibrary {
            atlas,
            types: vec![VoxelType {
                id: EMPTY_TYPE,
                name: EMPTY_NAME.to_string(),
                tint: [255, 255, 255, 255],
                transparent: false,
                emits_light: false,
                can_ramp: false,
                ramp_size: 0.0,
                transitions: TransitionMode::None,
                transition_textures: Vec::new(),
            }],
            primitives: vec![None],
            by_name: HashMap::from([(EMPTY_NAME.to_string(), EMPTY_TYPE)]),
            bedrock: EMPTY_TYPE,
        };
        for def in cfg.voxels {
            lib.add_type(def)?;
        }
        lib.bedrock = lib
            .id_by_name(BEDROCK_NAME)
            .ok_or(LibraryError::MissingBedrock)?;
        if lib.primitives[lib.bedrock as usize].is_none() {
            return Err(LibraryError::MissingBedrock);
        }
        log::debug!("voxel library: {} types", lib.types.len());
        Ok(lib)
    }

    fn add_type(&mut self, def: VoxelDef) -> Result<(), LibraryError> {
        if self.by_name.contains_key(&def.name) {
            return Err(LibraryError::DuplicateType(def.name));
        }
        let id = self.types.len() as VoxelTypeId;
        let (top, bottom, side) = match (def.top_tile(), def.bottom_tile(), def.side_tile()) {
            (Some(t), Some(b), Some(s)) => (t, b, s),
            _ if !def.render => ([0, 0], [0, 0], [0, 0]),
            _ => return Err(LibraryError::MissingTexture(def.name)),
        };
        let top_rect = self.rect(&def.name, top)?;
        let bottom_rect = self.rect(&def.name, bottom)?;
        let side_rect = self.rect(&def.name, side)?;

        let mut transitions = def.transitions;
        let mut transition_textures = Vec::new();
        if transitions != TransitionMode::None {
            match def.transition_tiles {
                Some(base) => {
                    for value in 0..16 {
                        let tile = TextureAtlas::transition_tile(base, value);
                        let r = self.rect(&def.name, tile)?;
                        transition_textures.push(BoxTextureCoords::new(r, bottom_rect, side_rect));
                    }
                }
                None => {
                    log::warn!(
                        "voxel type {:?} declares transitions without transition_tiles; ignoring",
                        def.name
                    );
                    transitions = TransitionMode::None;
                }
            }
        }

        let primitive = def
            .render
            .then(|| BoxPrimitive::new(BoxTextureCoords::new(top_rect, bottom_rect, side_rect)));
        self.by_name.insert(def.name.clone(), id);
        self.types.push(VoxelType {
            id,
            name: def.name,
            tint: def.tint,
            transparent: def.transparent,
            emits_light: def.emits_light,
            can_ramp: def.can_ramp,
            ramp_size: def.ramp_size,
            transitions,
            transition_textures,
        });
        self.primitives.push(primitive);
        Ok(())
    }

    fn rect(&self, voxel: &str, tile: TileRef) -> Result<Rect, LibraryError> {
        self.atlas
            .tile_rect(tile)
            .ok_or_else(|| LibraryError::TileOutOfRange {
                voxel: voxel.to_string(),
                col: tile[0],
                row: tile[1],
                columns: self.atlas.columns,
                rows: self.atlas.rows,
            })
    }

    #[inline]
    pub fn get_type(&self, id: VoxelTypeId) -> Option<&VoxelType> {
        self.types.get(id as usize)
    }

    /// Box geometry for `id`; `None` for empty and non-rendered types.
    #[inline]
    pub fn get_primitive(&self, id: VoxelTypeId) -> Option<&BoxPrimitive> {
        self.primitives.get(id as usize).and_then(|p| p.as_ref())
    }

    pub fn id_by_name(&self, name: &str) -> Option<VoxelTypeId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn bedrock(&self) -> VoxelTypeId {
        self.bedrock
    }

    /// Geometry drawn for voxels the player has not explored yet.
    #[inline]
    pub fn bedrock_primitive(&self) -> Option<&BoxPrimitive> {
        self.get_primitive(self.bedrock)
    }

    #[inline]
    pub fn is_transparent(&self, id: VoxelTypeId) -> bool {
        self.get_type(id).is_some_and(|t| t.transparent)
    }

    #[inline]
    pub fn emits_light(&self, id: VoxelTypeId) -> bool {
        self.get_type(id).is_some_and(|t| t.emits_light)
    }

    #[inline]
    pub fn can_ramp(&self, id: VoxelTypeId) -> bool {
        self.get_type(id).is_some_and(|t| t.can_ramp)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.len() <= 1
    }
}
