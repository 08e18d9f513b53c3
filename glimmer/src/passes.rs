mod resampling;

use log::debug;

use crate::Config;

macro_rules! passes {
    ([ $( $name:ident => $class:ident, )* ]) => {
        $( mod $name; )*
        $( pub use self::$name::*; )*

        #[derive(Debug)]
        pub struct Passes {
            $( pub $name: $class, )*
        }

        impl Passes {
            pub fn new(config: &Config) -> Self {
                debug!("Initializing passes");

                Self {
                    $( $name: $class::new(config), )*
                }
            }
        }
    };
}

passes!([
    caustic_resampling => CausticResamplingPass,
    fg_resampling => FgResamplingPass,
    final_shading => FinalShadingPass,
    photon_collection => PhotonCollectionPass,
    photon_indexing => PhotonIndexingPass,
    photon_tracing => PhotonTracingPass,
]);
